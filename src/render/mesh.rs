use crate::core::drawlist::DrawItem;
use crate::core::MeshData;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pos: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceData {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    material: [f32; 4],
}

impl From<&DrawItem> for InstanceData {
    fn from(d: &DrawItem) -> Self {
        Self {
            model: d.model.to_cols_array_2d(),
            color: d.color.extend(1.0).to_array(),
            material: [d.emissive, if d.unlit { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

pub(crate) const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
pub(crate) const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4
];

pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        // slot 0: mesh vertices
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        // slot 1: per-draw instance data
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ]
}

/// Uploaded vertex/index buffers for one mesh.
pub(crate) struct GpuMesh {
    pub(crate) vb: wgpu::Buffer,
    pub(crate) ib: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(mesh.normals.iter())
            .map(|(p, n)| Vertex {
                pos: *p,
                normal: *n,
            })
            .collect();
        let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ib = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vb,
            ib,
            index_count: mesh.indices.len() as u32,
        }
    }
}
