use super::shapes::MeshData;
use glam::{Mat3, Mat4, Vec3};

/// Why an asset could not be turned into renderable mesh data.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("fetch {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("model has no triangle geometry")]
    Empty,
}

impl From<gltf::Error> for AssetError {
    fn from(e: gltf::Error) -> Self {
        AssetError::Decode(e.to_string())
    }
}

/// Decode a binary or embedded glTF into one merged, world-space mesh.
///
/// Node transforms of the default scene are baked in. Primitives without
/// positions are skipped; missing normals default to +Y. Files relying on
/// unsupported extensions (e.g. Draco) surface as [`AssetError::Decode`].
pub fn decode_gltf(bytes: &[u8]) -> Result<MeshData, AssetError> {
    let (doc, buffers, _images) = gltf::import_slice(bytes)?;
    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or(AssetError::Empty)?;
    let mut out = MeshData::default();
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, &buffers, &mut out);
    }
    if out.is_empty() {
        return Err(AssetError::Empty);
    }
    Ok(out)
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let normal_mat = Mat3::from_mat4(world).inverse().transpose();
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions
                .map(|p| world.transform_point3(Vec3::from(p)).to_array())
                .collect();
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(ns) => ns
                    .map(|n| (normal_mat * Vec3::from(n)).normalize_or_zero().to_array())
                    .collect(),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };
            let indices: Vec<u32> = match reader.read_indices() {
                Some(ix) => ix.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            out.append(&MeshData {
                positions,
                normals,
                indices,
            });
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}
