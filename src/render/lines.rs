use super::helpers;
use crate::constants::{HINT_LINE_COLOR, PARTICLE_COLOR, PARTICLE_SIZE};
use crate::scene::PointVertex;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineStyle {
    line_color: [f32; 4],
    particle: [f32; 4],
}

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32];

/// Hint lines (line list) and burst particles (instanced quads). Both read
/// `PointVertex` data and share one bind group.
pub(crate) struct LineResources {
    pub(crate) line_pipeline: wgpu::RenderPipeline,
    pub(crate) particle_pipeline: wgpu::RenderPipeline,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) lines: helpers::DynamicBuffer,
    pub(crate) particles: helpers::DynamicBuffer,
    _style: wgpu::Buffer,
}

pub(crate) fn create_line_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    hdr_format: wgpu::TextureFormat,
    camera_buffer: &wgpu::Buffer,
) -> LineResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("lines_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::LINES_WGSL.into()),
    });
    let style_buffer = helpers::uniform_buffer::<LineStyle>(device, "line_style");
    let style = LineStyle {
        line_color: [HINT_LINE_COLOR[0], HINT_LINE_COLOR[1], HINT_LINE_COLOR[2], 1.0],
        particle: [PARTICLE_COLOR[0], PARTICLE_COLOR[1], PARTICLE_COLOR[2], PARTICLE_SIZE],
    };
    queue.write_buffer(&style_buffer, 0, bytemuck::bytes_of(&style));

    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("lines_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
            helpers::uniform_entry(1, wgpu::ShaderStages::VERTEX),
        ],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("lines_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: style_buffer.as_entire_binding(),
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("lines_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let make = |label: &str,
                vs: &str,
                fs: &str,
                step_mode: wgpu::VertexStepMode,
                topology: wgpu::PrimitiveTopology,
                blend: wgpu::BlendState| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(vs),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PointVertex>() as u64,
                    step_mode,
                    attributes: &POINT_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fs),
                targets: &[Some(wgpu::ColorTargetState {
                    format: hdr_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        })
    };
    let line_pipeline = make(
        "hint_line_pipeline",
        "vs_line",
        "fs_line",
        wgpu::VertexStepMode::Vertex,
        wgpu::PrimitiveTopology::LineList,
        wgpu::BlendState::ALPHA_BLENDING,
    );
    // Additive so overlapping sparks brighten into the bloom
    let additive = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent::OVER,
    };
    let particle_pipeline = make(
        "burst_pipeline",
        "vs_particle",
        "fs_particle",
        wgpu::VertexStepMode::Instance,
        wgpu::PrimitiveTopology::TriangleList,
        additive,
    );
    let point = std::mem::size_of::<PointVertex>() as u64;
    LineResources {
        line_pipeline,
        particle_pipeline,
        bind_group,
        lines: helpers::DynamicBuffer::new(device, "hint_line_vertices", 64 * point),
        particles: helpers::DynamicBuffer::new(device, "burst_instances", 512 * point),
        _style: style_buffer,
    }
}
