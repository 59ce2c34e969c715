use super::camera::{FirstPersonCamera, Ray};
use super::markers::{MarkerId, MarkerSet};
use super::shapes::MeshData;
use crate::constants::GROUND_SIZE;
use glam::{Mat4, Vec2, Vec3};

/// Hit-test volume in world (or marker-local) space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounds {
    Sphere { center: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

impl Bounds {
    pub fn translated(self, offset: Vec3) -> Self {
        match self {
            Bounds::Sphere { center, radius } => Bounds::Sphere {
                center: center + offset,
                radius,
            },
            Bounds::Aabb { min, max } => Bounds::Aabb {
                min: min + offset,
                max: max + offset,
            },
        }
    }

    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Bounds::Sphere { center, radius } => ray_sphere(ray.origin, ray.dir, center, radius),
            Bounds::Aabb { min, max } => ray_aabb(ray.origin, ray.dir, min, max),
        }
    }
}

/// Distance along a unit-direction ray to a sphere; a ray starting inside
/// reports the exit distance.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Slab test; returns the entry distance (0 when the origin is inside).
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray_dir.recip();
    let t1 = (min - ray_origin) * inv;
    let t2 = (max - ray_origin) * inv;
    let t_near = t1.min(t2).max_element();
    let t_far = t1.max(t2).min_element();
    if t_near.is_nan() || t_far.is_nan() || t_far < t_near.max(0.0) {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Möller-Trumbore test against triangle `abc`. Only counter-clockwise
/// (front) faces are hit.
#[inline]
pub fn ray_triangle(ray_origin: Vec3, ray_dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = b - a;
    let e2 = c - a;
    let p = ray_dir.cross(e2);
    let det = e1.dot(p);
    if det < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Upward-facing ground square at y = 0 centred on the origin.
#[inline]
pub fn ray_ground(ray: &Ray, half_extent: f32) -> Option<f32> {
    if ray.dir.y >= -1e-6 {
        return None;
    }
    let t = -ray.origin.y / ray.dir.y;
    if t < 0.0 {
        return None;
    }
    let p = ray.at(t);
    (p.x.abs() <= half_extent && p.z.abs() <= half_extent).then_some(t)
}

/// World-space triangles of a loaded model, tested exactly on click.
#[derive(Clone, Debug)]
pub struct PickMesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    min: Vec3,
    max: Vec3,
}

impl PickMesh {
    /// Bake `transform` into the mesh; `None` when it has no geometry.
    pub fn new(mesh: &MeshData, transform: Mat4) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }
        let positions: Vec<Vec3> = mesh
            .positions
            .iter()
            .map(|p| transform.transform_point3(Vec3::from(*p)))
            .collect();
        let first = *positions.first()?;
        let (min, max) = positions
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self {
            positions,
            indices: mesh.indices.clone(),
            min,
            max,
        })
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Nearest front-face hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray_aabb(ray.origin, ray.dir, self.min, self.max)?;
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let a = *self.positions.get(tri[0] as usize)?;
                let b = *self.positions.get(tri[1] as usize)?;
                let c = *self.positions.get(tri[2] as usize)?;
                ray_triangle(ray.origin, ray.dir, a, b, c)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// What a click or hover resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Marker(MarkerId),
    MainModel,
    Logo,
}

/// Pickable environment meshes, filled in as models finish loading. The
/// ground occludes but is never a target itself.
#[derive(Clone, Debug)]
pub struct EnvironmentTargets {
    pub main_model: Option<PickMesh>,
    pub logo: Option<PickMesh>,
    pub ground_half_extent: f32,
}

impl Default for EnvironmentTargets {
    fn default() -> Self {
        Self {
            main_model: None,
            logo: None,
            ground_half_extent: GROUND_SIZE * 0.5,
        }
    }
}

/// Nearest marker hit along `ray`, resolved through the shape owner map.
pub fn nearest_marker(ray: &Ray, markers: &MarkerSet) -> Option<MarkerId> {
    let mut best = None::<(MarkerId, f32)>;
    for (shape, bounds) in markers.world_hit_shapes() {
        let Some(t) = bounds.intersect(ray) else {
            continue;
        };
        let Some(owner) = markers.owner_of(shape) else {
            continue;
        };
        match best {
            Some((_, bt)) if t >= bt => {}
            _ => best = Some((owner, t)),
        }
    }
    best.map(|(id, _)| id)
}

/// Project `pointer_ndc` through the camera and return the marker under it.
pub fn pick_marker(
    pointer_ndc: Vec2,
    camera: &FirstPersonCamera,
    aspect: f32,
    markers: &MarkerSet,
) -> Option<MarkerId> {
    let ray = camera.ray_from_ndc(pointer_ndc, aspect);
    nearest_marker(&ray, markers)
}

/// Markers first; only when no marker is hit is the environment considered.
/// The nearest surface among main model, logo and ground decides.
pub fn pick(
    pointer_ndc: Vec2,
    camera: &FirstPersonCamera,
    aspect: f32,
    markers: &MarkerSet,
    env: &EnvironmentTargets,
) -> Option<PickTarget> {
    let ray = camera.ray_from_ndc(pointer_ndc, aspect);
    if let Some(id) = nearest_marker(&ray, markers) {
        return Some(PickTarget::Marker(id));
    }
    let main = env
        .main_model
        .as_ref()
        .and_then(|m| m.intersect(&ray))
        .map(|t| (Some(PickTarget::MainModel), t));
    let logo = env
        .logo
        .as_ref()
        .and_then(|m| m.intersect(&ray))
        .map(|t| (Some(PickTarget::Logo), t));
    let ground = ray_ground(&ray, env.ground_half_extent).map(|t| (None, t));
    [main, logo, ground]
        .into_iter()
        .flatten()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .and_then(|(target, _)| target)
}

/// Hover hint text for a marker name.
#[inline]
pub fn hint_text(name: &str) -> String {
    format!("Click to view {}", name)
}
