use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// CPU-side triangle mesh: flat arrays ready to upload as vertex/index buffers.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds of all positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.positions.iter().map(|p| Vec3::from(*p));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Append `other`, rebasing its indices.
    pub fn append(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    // Flat-shaded triangle: each face gets its own three vertices
    fn push_flat_tri(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let n = (b - a).cross(c - a).normalize_or_zero();
        let base = self.positions.len() as u32;
        for p in [a, b, c] {
            self.positions.push(p.to_array());
            self.normals.push(n.to_array());
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
}

/// Crystal silhouettes floating above each marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrystalShape {
    Octahedron,
    Icosahedron,
    Tetrahedron,
    Dodecahedron,
    Cone,
    Cube,
    Torus,
    Cylinder,
}

impl CrystalShape {
    pub const ALL: [CrystalShape; 8] = [
        CrystalShape::Octahedron,
        CrystalShape::Icosahedron,
        CrystalShape::Tetrahedron,
        CrystalShape::Dodecahedron,
        CrystalShape::Cone,
        CrystalShape::Cube,
        CrystalShape::Torus,
        CrystalShape::Cylinder,
    ];

    /// Marker name to crystal, falling back to the octahedron.
    pub fn for_marker(name: &str) -> Self {
        match name {
            "Home" => CrystalShape::Octahedron,
            "About" => CrystalShape::Icosahedron,
            "Event Calendar" => CrystalShape::Tetrahedron,
            "Workshop" => CrystalShape::Dodecahedron,
            "Address" => CrystalShape::Cone,
            "Archives" => CrystalShape::Cube,
            "Ritual Merch" => CrystalShape::Torus,
            "3D Design" => CrystalShape::Cylinder,
            _ => CrystalShape::Octahedron,
        }
    }

    pub fn build(self) -> MeshData {
        match self {
            CrystalShape::Octahedron => octahedron(0.6),
            CrystalShape::Icosahedron => icosahedron(0.6),
            CrystalShape::Tetrahedron => tetrahedron(0.6),
            CrystalShape::Dodecahedron => dodecahedron(0.6),
            CrystalShape::Cone => cylinder(0.0, 0.5, 1.2, 6),
            CrystalShape::Cube => cuboid(Vec3::splat(0.8)),
            CrystalShape::Torus => torus(0.5, 0.2, 16, 8),
            CrystalShape::Cylinder => cylinder(0.4, 0.4, 1.2, 6),
        }
    }
}

pub fn octahedron(radius: f32) -> MeshData {
    let v = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
    .map(|p| p * radius);
    let faces = [
        [0, 2, 4],
        [4, 2, 1],
        [1, 2, 5],
        [5, 2, 0],
        [4, 3, 0],
        [1, 3, 4],
        [5, 3, 1],
        [0, 3, 5],
    ];
    let mut m = MeshData::default();
    for [a, b, c] in faces {
        m.push_flat_tri(v[a], v[b], v[c]);
    }
    m
}

pub fn tetrahedron(radius: f32) -> MeshData {
    let s = radius / 3f32.sqrt();
    let v = [
        Vec3::new(1.0, 1.0, 1.0) * s,
        Vec3::new(-1.0, -1.0, 1.0) * s,
        Vec3::new(-1.0, 1.0, -1.0) * s,
        Vec3::new(1.0, -1.0, -1.0) * s,
    ];
    let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    let mut m = MeshData::default();
    for [a, b, c] in faces {
        m.push_flat_tri(v[a], v[b], v[c]);
    }
    m
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Unit-radius icosahedron corners.
fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(Vec3::normalize)
}

pub fn icosahedron(radius: f32) -> MeshData {
    let v = icosahedron_vertices().map(|p| p * radius);
    let mut m = MeshData::default();
    for [a, b, c] in ICOSAHEDRON_FACES {
        m.push_flat_tri(v[a], v[b], v[c]);
    }
    m
}

/// Dual of the icosahedron: one pentagon per icosahedron corner, built from
/// the centres of the five faces meeting there.
pub fn dodecahedron(radius: f32) -> MeshData {
    let ico = icosahedron_vertices();
    let centres: Vec<Vec3> = ICOSAHEDRON_FACES
        .iter()
        .map(|[a, b, c]| ((ico[*a] + ico[*b] + ico[*c]) / 3.0).normalize())
        .collect();
    let mut m = MeshData::default();
    for (corner, axis) in ico.iter().enumerate() {
        let mut ring: Vec<Vec3> = ICOSAHEDRON_FACES
            .iter()
            .zip(&centres)
            .filter(|(face, _)| face.contains(&corner))
            .map(|(_, c)| *c)
            .collect();
        if ring.len() < 3 {
            continue;
        }
        let u = (ring[0] - *axis * ring[0].dot(*axis)).normalize();
        let w = axis.cross(u);
        ring.sort_by(|a, b| {
            let angle = |p: &Vec3| p.dot(w).atan2(p.dot(u));
            angle(a).total_cmp(&angle(b))
        });
        for i in 1..ring.len() - 1 {
            m.push_flat_tri(ring[0] * radius, ring[i] * radius, ring[i + 1] * radius);
        }
    }
    m
}

/// Axis-aligned box centred on the origin.
pub fn cuboid(size: Vec3) -> MeshData {
    let h = size * 0.5;
    let mut m = MeshData::default();
    // (normal, up, right) per face
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::NEG_Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::X),
        (Vec3::Z, Vec3::Y, Vec3::X),
        (Vec3::NEG_Z, Vec3::Y, Vec3::NEG_X),
    ];
    for (n, u, r) in faces {
        let c = n * h;
        let du = u * h;
        let dr = r * h;
        let a = c - dr - du;
        let b = c + dr - du;
        let cc = c + dr + du;
        let d = c - dr + du;
        m.push_flat_tri(a, b, cc);
        m.push_flat_tri(a, cc, d);
    }
    m
}

/// Cylinder/cone along Y centred on the origin; `top_radius == 0` gives a cone.
pub fn cylinder(top_radius: f32, bottom_radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let hy = height * 0.5;
    let mut m = MeshData::default();
    let ring = |r: f32, y: f32, i: u32| {
        let a = i as f32 / segments as f32 * TAU;
        Vec3::new(r * a.cos(), y, -r * a.sin())
    };
    for i in 0..segments {
        let b0 = ring(bottom_radius, -hy, i);
        let b1 = ring(bottom_radius, -hy, i + 1);
        let t0 = ring(top_radius, hy, i);
        let t1 = ring(top_radius, hy, i + 1);
        if bottom_radius > 0.0 {
            m.push_flat_tri(b0, b1, t1);
            m.push_flat_tri(Vec3::new(0.0, -hy, 0.0), b1, b0);
        }
        if top_radius > 0.0 {
            m.push_flat_tri(b0, t1, t0);
            m.push_flat_tri(Vec3::new(0.0, hy, 0.0), t0, t1);
        } else {
            m.push_flat_tri(b0, b1, t0);
        }
    }
    m
}

/// Smooth UV sphere.
pub fn uv_sphere(radius: f32, rings: u32, segments: u32) -> MeshData {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut m = MeshData::default();
    for r in 0..=rings {
        let theta = r as f32 / rings as f32 * PI;
        for s in 0..=segments {
            let phi = s as f32 / segments as f32 * TAU;
            let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), -theta.sin() * phi.sin());
            m.positions.push((n * radius).to_array());
            m.normals.push(n.to_array());
        }
    }
    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            m.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    m
}

/// Torus lying in the XZ plane.
pub fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> MeshData {
    let radial = radial.max(3);
    let tubular = tubular.max(3);
    let mut m = MeshData::default();
    for i in 0..=radial {
        let u = i as f32 / radial as f32 * TAU;
        let center = Vec3::new(radius * u.cos(), 0.0, -radius * u.sin());
        for j in 0..=tubular {
            let v = j as f32 / tubular as f32 * TAU;
            let outward = Vec3::new(u.cos(), 0.0, -u.sin());
            let n = outward * v.cos() + Vec3::Y * v.sin();
            m.positions.push((center + n * tube).to_array());
            m.normals.push(n.to_array());
        }
    }
    let stride = tubular + 1;
    for i in 0..radial {
        for j in 0..tubular {
            let a = i * stride + j;
            let b = a + stride;
            m.indices.extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    m
}

/// Square ground plane at y = 0 facing up.
pub fn ground_plane(size: f32) -> MeshData {
    let h = size * 0.5;
    MeshData {
        positions: vec![[-h, 0.0, -h], [-h, 0.0, h], [h, 0.0, h], [h, 0.0, -h]],
        normals: vec![[0.0, 1.0, 0.0]; 4],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Grid lines as thin up-facing strips just above the ground, `divisions`
/// cells across. `centre` selects the pair through the origin, otherwise all the
/// rest; odd division counts have no centre pair.
pub fn grid_lines(size: f32, divisions: u32, line_width: f32, centre: bool) -> MeshData {
    const LIFT: f32 = 0.01;
    let divisions = divisions.max(1);
    let h = size * 0.5;
    let step = size / divisions as f32;
    let w = line_width * 0.5;
    let mut m = MeshData::default();
    let mut strip = |x0: f32, x1: f32, z0: f32, z1: f32| {
        let base = m.positions.len() as u32;
        m.positions.extend_from_slice(&[
            [x0, LIFT, z0],
            [x0, LIFT, z1],
            [x1, LIFT, z1],
            [x1, LIFT, z0],
        ]);
        m.normals.extend_from_slice(&[[0.0, 1.0, 0.0]; 4]);
        m.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    };
    for i in 0..=divisions {
        let is_centre = 2 * i == divisions;
        if is_centre != centre {
            continue;
        }
        let k = -h + i as f32 * step;
        strip(k - w, k + w, -h, h);
        strip(-h, h, k - w, k + w);
    }
    m
}
