use super::helpers;
use crate::atlas::AtlasLayout;
use crate::constants::{ATLAS_GUTTER_PX, ATLAS_MAX_WIDTH, LABEL_FONT, LABEL_FONT_PX, LABEL_PADDING_PX};
use crate::dom;
use crate::scene::WordInstance;
use wasm_bindgen::JsCast;
use wgpu::util::DeviceExt;
use web_sys as web;

const WORD_ATTRIBUTES: [wgpu::VertexAttribute; 6] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32,
        offset: 12,
        shader_location: 1,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 16,
        shader_location: 2,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32,
        offset: 24,
        shader_location: 3,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 32,
        shader_location: 4,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: 48,
        shader_location: 5,
    },
];

pub(crate) struct WordResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) camera_bg: wgpu::BindGroup,
    pub(crate) atlas_bg: wgpu::BindGroup,
    pub(crate) atlas: AtlasLayout,
    pub(crate) instances: helpers::DynamicBuffer,
}

/// Draw every label once into a 2D canvas and read the pixels back.
/// Glyphs are white; the shader tints them and uses alpha only.
pub(crate) fn rasterize_labels(words: &[String]) -> anyhow::Result<(AtlasLayout, Vec<u8>)> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    ctx.set_font(LABEL_FONT);
    let widths: Vec<u32> = words
        .iter()
        .map(|w| {
            let text_w = ctx
                .measure_text(w)
                .map(|m| m.width().ceil() as u32)
                .unwrap_or(LABEL_FONT_PX * w.chars().count() as u32);
            text_w + LABEL_PADDING_PX
        })
        .collect();
    let layout = AtlasLayout::pack(
        &widths,
        LABEL_FONT_PX + LABEL_PADDING_PX,
        ATLAS_MAX_WIDTH,
        ATLAS_GUTTER_PX,
    );
    canvas.set_width(layout.width);
    canvas.set_height(layout.height);

    // Resizing the canvas resets the context state
    ctx.set_font(LABEL_FONT);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    for (i, w) in words.iter().enumerate() {
        if let Some(r) = layout.rect(i) {
            _ = ctx.fill_text(w, r.x as f64 + r.w as f64 * 0.5, r.y as f64 + r.h as f64 * 0.5);
        }
    }
    let pixels = ctx
        .get_image_data(0.0, 0.0, layout.width as f64, layout.height as f64)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .data()
        .0;
    log::info!(
        "[atlas] {} labels in {}x{}",
        layout.len(),
        layout.width,
        layout.height
    );
    Ok((layout, pixels))
}

pub(crate) fn create_word_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    hdr_format: wgpu::TextureFormat,
    camera_buffer: &wgpu::Buffer,
    words: &[String],
) -> anyhow::Result<WordResources> {
    let (atlas, pixels) = rasterize_labels(words)?;
    let atlas_tex = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("label_atlas"),
            size: wgpu::Extent3d {
                width: atlas.width,
                height: atlas.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &pixels,
    );
    let atlas_view = atlas_tex.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = helpers::linear_clamp_sampler(device, "atlas_sampler");

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("words_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::WORDS_WGSL.into()),
    });
    let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("words_camera_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let atlas_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("words_atlas_bgl"),
        entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
    });
    let camera_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("words_camera_bg"),
        layout: &camera_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: camera_buffer.as_entire_binding(),
        }],
    });
    let atlas_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("words_atlas_bg"),
        layout: &atlas_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&atlas_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("words_pl"),
        bind_group_layouts: &[&camera_bgl, &atlas_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("words_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_word"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<WordInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &WORD_ATTRIBUTES,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_word"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let instances = helpers::DynamicBuffer::new(
        device,
        "word_instances",
        (words.len().max(1) * std::mem::size_of::<WordInstance>()) as u64,
    );
    Ok(WordResources {
        pipeline,
        camera_bg,
        atlas_bg,
        atlas,
        instances,
    })
}
