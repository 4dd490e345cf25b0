use crate::camera::CameraUniforms;
use crate::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD, CLEAR_COLOR};
use crate::core::Frame;
use crate::scene::{self, PointVertex, WordInstance};
use web_sys as web;

mod background;
mod helpers;
mod lines;
mod post;
mod targets;
mod words;

use background::{create_background_resources, BackgroundResources, BackgroundUniforms};
use lines::{create_line_resources, LineResources};
use post::{PostResources, PostUniforms};
use targets::RenderTargets;
use words::{create_word_resources, WordResources};

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    background: BackgroundResources,
    words: WordResources,
    lines: LineResources,
    camera_buffer: wgpu::Buffer,

    targets: RenderTargets,
    post: PostResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    pointer_uv: [f32; 2],

    // Reused each frame
    word_scratch: Vec<WordInstance>,
    line_scratch: Vec<PointVertex>,
    particle_scratch: Vec<PointVertex>,
}

impl<'a> GpuState<'a> {
    /// `labels` are the field's words in entity order; the atlas rect of
    /// entity `i` is rect `i`.
    pub async fn new(canvas: &'a web::HtmlCanvasElement, labels: &[String]) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let hdr_format = RenderTargets::format();
        let targets = RenderTargets::new(&device, width, height);
        let camera_buffer = helpers::uniform_buffer::<CameraUniforms>(&device, "camera_uniforms");
        let background = create_background_resources(&device, hdr_format);
        let words = create_word_resources(&device, &queue, hdr_format, &camera_buffer, labels)?;
        let lines = create_line_resources(&device, &queue, hdr_format, &camera_buffer);
        let post = PostResources::new(&device, &targets, format);
        log::info!("[render] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            background,
            words,
            lines,
            camera_buffer,
            targets,
            post,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            pointer_uv: [0.5, 0.5],
            word_scratch: Vec::new(),
            line_scratch: Vec::new(),
            particle_scratch: Vec::new(),
        })
    }

    pub fn set_pointer(&mut self, uv: [f32; 2]) {
        self.pointer_uv = uv;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets = RenderTargets::new(&self.device, width, height);
            self.post.rebind(&self.device, &self.targets);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn render(&mut self, frame: &Frame) -> Result<(), wgpu::SurfaceError> {
        let time = frame.time as f32;
        let cam = CameraUniforms::from_pose(frame.camera, self.aspect());
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));
        let bg = BackgroundUniforms {
            resolution: [self.width as f32, self.height as f32],
            time,
            presence: frame.presence,
            pointer: self.pointer_uv,
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.background.uniform_buffer, 0, bytemuck::bytes_of(&bg));

        scene::pack_words(frame, &self.words.atlas, &mut self.word_scratch);
        scene::pack_hint_lines(frame, &mut self.line_scratch);
        scene::pack_particles(frame, &mut self.particle_scratch);
        self.words
            .instances
            .write(&self.device, &self.queue, &self.word_scratch);
        self.lines
            .lines
            .write(&self.device, &self.queue, &self.line_scratch);
        self.lines
            .particles
            .write(&self.device, &self.queue, &self.particle_scratch);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.background.pipeline);
            rpass.set_bind_group(0, &self.background.bind_group, &[]);
            rpass.draw(0..3, 0..1);

            if !self.lines.lines.is_empty() {
                rpass.set_pipeline(&self.lines.line_pipeline);
                rpass.set_bind_group(0, &self.lines.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.lines.lines.slice());
                rpass.draw(0..self.lines.lines.len(), 0..1);
            }
            if !self.lines.particles.is_empty() {
                rpass.set_pipeline(&self.lines.particle_pipeline);
                rpass.set_bind_group(0, &self.lines.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.lines.particles.slice());
                rpass.draw(0..6, 0..self.lines.particles.len());
            }
            if !self.words.instances.is_empty() {
                rpass.set_pipeline(&self.words.pipeline);
                rpass.set_bind_group(0, &self.words.camera_bg, &[]);
                rpass.set_bind_group(1, &self.words.atlas_bg, &[]);
                rpass.set_vertex_buffer(0, self.words.instances.slice());
                rpass.draw(0..6, 0..self.words.instances.len());
            }
        }

        let (bw, bh) = RenderTargets::bloom_size(self.width, self.height);
        self.post.run(
            &self.queue,
            &mut encoder,
            &self.targets,
            &view,
            PostUniforms {
                resolution: [bw as f32, bh as f32],
                time,
                ambient: frame.presence,
                blur_dir: [0.0, 0.0],
                bloom_strength: BLOOM_STRENGTH,
                threshold: BLOOM_THRESHOLD,
            },
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
