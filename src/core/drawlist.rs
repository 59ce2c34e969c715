use super::markers::{Marker, MarkerSet, MarkerVisual};
use super::session::{logo_transform, SceneSession};
use super::shapes::{self, CrystalShape, MeshData};
use crate::constants::*;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Which GPU mesh a draw uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKey {
    Ground,
    Grid,
    GridCentre,
    MainModel,
    Logo,
    MarkerModel,
    FallbackSphere,
    Ring,
    Crystal(usize),
}

impl MeshKey {
    pub fn crystal(shape: CrystalShape) -> Self {
        let idx = CrystalShape::ALL
            .iter()
            .position(|s| *s == shape)
            .unwrap_or_default();
        MeshKey::Crystal(idx)
    }
}

/// Meshes generated on the CPU at startup (models arrive later).
pub fn builtin_meshes() -> Vec<(MeshKey, MeshData)> {
    let mut out = vec![
        (MeshKey::Ground, shapes::ground_plane(GROUND_SIZE)),
        (
            MeshKey::Grid,
            shapes::grid_lines(GROUND_SIZE, GRID_DIVISIONS, GRID_LINE_WIDTH, false),
        ),
        (
            MeshKey::GridCentre,
            shapes::grid_lines(GROUND_SIZE, GRID_DIVISIONS, GRID_LINE_WIDTH, true),
        ),
        (
            MeshKey::FallbackSphere,
            shapes::uv_sphere(FALLBACK_SPHERE_RADIUS, 16, 24),
        ),
        (MeshKey::Ring, shapes::torus(RING_RADIUS, RING_TUBE, 48, 8)),
    ];
    out.extend(
        CrystalShape::ALL
            .iter()
            .map(|s| (MeshKey::crystal(*s), s.build())),
    );
    out.retain(|(_, mesh)| !mesh.is_empty());
    out
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshKey,
    pub model: Mat4,
    pub color: Vec3,
    pub emissive: f32,
    /// Flat color without lighting; used for the glowing rings.
    pub unlit: bool,
}

fn marker_draws(m: &Marker, out: &mut Vec<DrawItem>) {
    let body = match m.visual {
        MarkerVisual::Model => Some(MeshKey::MarkerModel),
        MarkerVisual::Fallback => Some(MeshKey::FallbackSphere),
        MarkerVisual::Pending => None,
    };
    if let Some(mesh) = body {
        let rot = Quat::from_euler(
            EulerRot::XYZ,
            m.model_rotation.x,
            m.model_rotation.y,
            m.model_rotation.z,
        );
        out.push(DrawItem {
            mesh,
            model: Mat4::from_scale_rotation_translation(Vec3::splat(m.scale), rot, m.position),
            color: m.color,
            emissive: m.emissive,
            unlit: false,
        });
    }
    out.push(DrawItem {
        mesh: MeshKey::Ring,
        model: Mat4::from_rotation_translation(Quat::from_rotation_y(m.ring_spin), m.position),
        color: m.color * 0.6,
        emissive: 1.0,
        unlit: true,
    });
    let crystal_rot = Quat::from_euler(
        EulerRot::YXZ,
        m.crystal_rotation.y,
        m.crystal_rotation.x,
        m.crystal_rotation.z,
    );
    out.push(DrawItem {
        mesh: MeshKey::crystal(m.crystal),
        model: Mat4::from_rotation_translation(crystal_rot, m.crystal_position()),
        color: m.color,
        emissive: m.emissive * 0.75,
        unlit: false,
    });
}

pub fn marker_draw_list(markers: &MarkerSet) -> Vec<DrawItem> {
    let mut out = Vec::with_capacity(markers.len() * 3);
    for m in markers.iter() {
        marker_draws(m, &mut out);
    }
    out
}

/// Everything the main scene draws this frame, in no particular order.
pub fn scene_draw_list(session: &SceneSession, has_main: bool, has_logo: bool) -> Vec<DrawItem> {
    let ground = color_from_hex(GROUND_COLOR);
    let mut out = vec![DrawItem {
        mesh: MeshKey::Ground,
        model: Mat4::IDENTITY,
        color: ground,
        emissive: 0.0,
        unlit: false,
    }];
    // No blending in the scene pass; the lines are pre-mixed over the ground
    let mut grid = vec![(MeshKey::Grid, GRID_COLOR)];
    // An odd division count has no line through the origin.
    if GRID_DIVISIONS % 2 == 0 {
        grid.push((MeshKey::GridCentre, GRID_CENTRE_COLOR));
    }
    for (mesh, hex) in grid {
        out.push(DrawItem {
            mesh,
            model: Mat4::IDENTITY,
            color: ground.lerp(color_from_hex(hex), GRID_OPACITY),
            emissive: 1.0,
            unlit: true,
        });
    }
    if has_main {
        out.push(DrawItem {
            mesh: MeshKey::MainModel,
            model: Mat4::IDENTITY,
            color: Vec3::splat(0.8),
            emissive: 0.13,
            unlit: false,
        });
    }
    if has_logo {
        out.push(DrawItem {
            mesh: MeshKey::Logo,
            model: logo_transform(),
            color: color_from_hex(0xc0c0c0),
            emissive: 0.2,
            unlit: false,
        });
    }
    out.extend(marker_draw_list(&session.markers));
    out
}
