use super::helpers::DEPTH_FORMAT;
use super::mesh;
use crate::core::{LightKind, SceneLight};
use glam::{Mat4, Vec3};

pub(crate) const MAX_LIGHTS: usize = 32;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    pos_kind: [f32; 4],
    color_intensity: [f32; 4],
    ground_range: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    fog: [f32; 4],
    params: [f32; 4],
    lights: [LightPacked; MAX_LIGHTS],
}

fn kind_code(kind: LightKind) -> f32 {
    match kind {
        LightKind::Ambient => 0.0,
        LightKind::Hemisphere => 1.0,
        LightKind::Directional => 2.0,
        LightKind::Point => 3.0,
        LightKind::Spot => 4.0,
    }
}

fn pack_light(l: &SceneLight) -> LightPacked {
    LightPacked {
        pos_kind: l.position.extend(kind_code(l.kind)).to_array(),
        color_intensity: l.color.extend(l.intensity).to_array(),
        ground_range: l.ground.extend(l.range).to_array(),
    }
}

/// Camera, fog and lights for one frame.
pub struct SceneView<'a> {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub background: Vec3,
    pub fog_color: Vec3,
    pub fog_near: f32,
    pub fog_far: f32,
    pub lights: &'a [SceneLight],
}

impl SceneView<'_> {
    pub(crate) fn uniforms(&self) -> SceneUniforms {
        let mut lights = [LightPacked::default(); MAX_LIGHTS];
        // Dark lights contribute nothing; skip them so the rest fit
        let live = self.lights.iter().filter(|l| l.intensity > 0.0);
        let mut count = 0;
        for (slot, l) in lights.iter_mut().zip(live) {
            *slot = pack_light(l);
            count += 1;
        }
        SceneUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
            fog: self.fog_color.extend(self.fog_near).to_array(),
            params: [self.fog_far, count as f32, 0.0, 0.0],
            lights,
        }
    }
}

pub(crate) struct ScenePipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_scene_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> ScenePipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let buffers = mesh::vertex_layouts();
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Model winding is not consistent; shade both sides
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    ScenePipeline {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}
