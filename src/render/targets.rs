use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen targets: full-resolution HDR color and depth for the scene
/// pass, plus two half-resolution bloom ping-pong buffers.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    _textures: [wgpu::Texture; 4],
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, usage);
        let (depth, depth_view) = helpers::create_depth_texture(device, width, height);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, usage);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, usage);
        Self {
            hdr_view,
            depth_view,
            bloom_a_view,
            bloom_b_view,
            _textures: [hdr, depth, bloom_a, bloom_b],
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
