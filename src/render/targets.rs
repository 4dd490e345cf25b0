use super::helpers;

const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets: the full-resolution HDR scene and two
/// half-resolution bloom ping-pong buffers.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    // Views keep their textures alive; held so recreation drops both together
    _textures: [wgpu::Texture; 3],
}

impl RenderTargets {
    pub(crate) fn format() -> wgpu::TextureFormat {
        HDR_FORMAT
    }

    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, usage);
        let (bw, bh) = Self::bloom_size(width, height);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, usage);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, usage);
        Self {
            hdr_view,
            bloom_a_view,
            bloom_b_view,
            _textures: [hdr, bloom_a, bloom_b],
        }
    }

    pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
        ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
    }
}
