use super::helpers;
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) ambient: f32,
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) threshold: f32,
}

struct PostBindGroups {
    from_hdr: wgpu::BindGroup,
    from_bloom_a: wgpu::BindGroup,
    from_bloom_b: wgpu::BindGroup,
    bloom_a_only: wgpu::BindGroup,
}

/// Bright pass, separable blur and composite. Each pass reads its own
/// uniform buffer because all of them are recorded before one submit.
pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    uniforms: [wgpu::Buffer; 4],
    groups: [PostBindGroups; 4],
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
}

const PASS_BRIGHT: usize = 0;
const PASS_BLUR_H: usize = 1;
const PASS_BLUR_V: usize = 2;
const PASS_COMPOSITE: usize = 3;

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        targets: &RenderTargets,
        swap_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                helpers::texture_entry(0),
                helpers::sampler_entry(1),
                helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
        });
        let sampler = helpers::linear_clamp_sampler(device, "post_sampler");
        let uniforms = [
            helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms_bright"),
            helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms_blur_h"),
            helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms_blur_v"),
            helpers::uniform_buffer::<PostUniforms>(device, "post_uniforms_composite"),
        ];
        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bloom_format = RenderTargets::format();
        let bright_pipeline = helpers::make_fullscreen_pipeline(
            device, "bright_pipeline", &pl_single, &shader, "fs_bright", bloom_format, None,
        );
        let blur_pipeline = helpers::make_fullscreen_pipeline(
            device, "blur_pipeline", &pl_single, &shader, "fs_blur", bloom_format, None,
        );
        let composite_pipeline = helpers::make_fullscreen_pipeline(
            device,
            "composite_pipeline",
            &pl_composite,
            &shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );
        let groups = std::array::from_fn(|i| {
            Self::bind_groups(device, &bgl0, &bgl1, &sampler, &uniforms[i], targets)
        });
        Self {
            bgl0,
            bgl1,
            sampler,
            uniforms,
            groups,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
        }
    }

    fn bind_groups(
        device: &wgpu::Device,
        bgl0: &wgpu::BindGroupLayout,
        bgl1: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        uniform: &wgpu::Buffer,
        targets: &RenderTargets,
    ) -> PostBindGroups {
        let with_uniform = |label: &str, view: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: bgl0,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: uniform.as_entire_binding(),
                    },
                ],
            })
        };
        let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_bloom_a_only"),
            layout: bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        PostBindGroups {
            from_hdr: with_uniform("bg_hdr", &targets.hdr_view),
            from_bloom_a: with_uniform("bg_from_bloom_a", &targets.bloom_a_view),
            from_bloom_b: with_uniform("bg_from_bloom_b", &targets.bloom_b_view),
            bloom_a_only,
        }
    }

    /// Targets were recreated; rebind every view.
    pub(crate) fn rebind(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        for (i, g) in self.groups.iter_mut().enumerate() {
            *g = Self::bind_groups(device, &self.bgl0, &self.bgl1, &self.sampler, &self.uniforms[i], targets);
        }
    }

    pub(crate) fn run(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        swap_view: &wgpu::TextureView,
        base: PostUniforms,
    ) {
        let write = |pass: usize, blur_dir: [f32; 2]| {
            let u = PostUniforms { blur_dir, ..base };
            queue.write_buffer(&self.uniforms[pass], 0, bytemuck::bytes_of(&u));
        };
        write(PASS_BRIGHT, [0.0, 0.0]);
        write(PASS_BLUR_H, [1.0, 0.0]);
        write(PASS_BLUR_V, [0.0, 1.0]);
        write(PASS_COMPOSITE, [0.0, 0.0]);

        blit(
            encoder,
            "bright_pass",
            &targets.bloom_a_view,
            &self.bright_pipeline,
            &self.groups[PASS_BRIGHT].from_hdr,
            None,
        );
        blit(
            encoder,
            "blur_h",
            &targets.bloom_b_view,
            &self.blur_pipeline,
            &self.groups[PASS_BLUR_H].from_bloom_a,
            None,
        );
        blit(
            encoder,
            "blur_v",
            &targets.bloom_a_view,
            &self.blur_pipeline,
            &self.groups[PASS_BLUR_V].from_bloom_b,
            None,
        );
        blit(
            encoder,
            "composite",
            swap_view,
            &self.composite_pipeline,
            &self.groups[PASS_COMPOSITE].from_hdr,
            Some(&self.groups[PASS_COMPOSITE].bloom_a_only),
        );
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
