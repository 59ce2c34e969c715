use super::helpers;
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    exposure: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

pub(crate) const BLOOM_STRENGTH: f32 = 0.6;
pub(crate) const BLOOM_THRESHOLD: f32 = 0.9;
pub(crate) const EXPOSURE: f32 = 1.0;

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    /// Horizontal blur direction; also read by the bright and composite passes.
    pub(crate) uniforms_h: wgpu::Buffer,
    pub(crate) uniforms_v: wgpu::Buffer,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

/// Bind groups that reference the offscreen targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    pub(crate) from_hdr: wgpu::BindGroup,
    pub(crate) from_bloom_a: wgpu::BindGroup,
    pub(crate) from_bloom_b: wgpu::BindGroup,
    pub(crate) bloom_a_only: wgpu::BindGroup,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    bloom_format: wgpu::TextureFormat,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
    });
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            texture_entry(0),
            sampler_entry(1),
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[texture_entry(0), sampler_entry(1)],
    });
    let uniform_buffer = |label: &str| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<PostUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    };
    let uniforms_h = uniform_buffer("post_uniforms_h");
    let uniforms_v = uniform_buffer("post_uniforms_v");
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
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
    let bright_pipeline =
        helpers::make_post_pipeline(device, &pl_single, &shader, "fs_bright", bloom_format);
    let blur_pipeline =
        helpers::make_post_pipeline(device, &pl_single, &shader, "fs_blur", bloom_format);
    let composite_pipeline =
        helpers::make_post_pipeline(device, &pl_composite, &shader, "fs_composite", swap_format);

    PostResources {
        bgl0,
        bgl1,
        uniforms_h,
        uniforms_v,
        sampler,
        bright_pipeline,
        blur_pipeline,
        composite_pipeline,
    }
}

pub(crate) fn create_bind_groups(
    device: &wgpu::Device,
    post: &PostResources,
    targets: &RenderTargets,
) -> PostBindGroups {
    let with_uniform = |label: &str, view: &wgpu::TextureView, uniforms: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &post.bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&post.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        })
    };
    let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_a_only"),
        layout: &post.bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&post.sampler),
            },
        ],
    });
    PostBindGroups {
        from_hdr: with_uniform("bg_hdr", &targets.hdr_view, &post.uniforms_h),
        from_bloom_a: with_uniform("bg_from_bloom_a", &targets.bloom_a_view, &post.uniforms_h),
        from_bloom_b: with_uniform("bg_from_bloom_b", &targets.bloom_b_view, &post.uniforms_v),
        bloom_a_only,
    }
}

/// All passes of a frame are recorded before submit, so each blur direction
/// gets its own buffer.
pub(crate) fn write_post_uniforms(
    queue: &wgpu::Queue,
    post: &PostResources,
    resolution: [f32; 2],
    time: f32,
) {
    let u = |blur_dir: [f32; 2]| PostUniforms {
        resolution,
        time,
        exposure: EXPOSURE,
        blur_dir,
        bloom_strength: BLOOM_STRENGTH,
        threshold: BLOOM_THRESHOLD,
    };
    queue.write_buffer(&post.uniforms_h, 0, bytemuck::bytes_of(&u([1.0, 0.0])));
    queue.write_buffer(&post.uniforms_v, 0, bytemuck::bytes_of(&u([0.0, 1.0])));
}

pub(crate) fn blit(
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
