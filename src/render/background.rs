use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BackgroundUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) presence: f32,
    pub(crate) pointer: [f32; 2],
    pub(crate) _pad: [f32; 2],
}

pub(crate) struct BackgroundResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_background_resources(
    device: &wgpu::Device,
    hdr_format: wgpu::TextureFormat,
) -> BackgroundResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("background_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::BACKGROUND_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("background_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("background_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_fullscreen_pipeline(
        device,
        "background_pipeline",
        &pl,
        &shader,
        "fs_background",
        hdr_format,
        None,
    );
    let uniform_buffer = helpers::uniform_buffer::<BackgroundUniforms>(device, "background_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("background_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    BackgroundResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}
