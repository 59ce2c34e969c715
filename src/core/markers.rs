use super::picking::Bounds;
use super::shapes::CrystalShape;
use crate::constants::*;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

pub type MarkerId = usize;

/// Identity of one hit-test volume; resolved to a marker via [`MarkerSet::owner_of`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u32);

/// Static description of a marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub name: String,
    pub panel_id: String,
    pub color: Vec3,
    pub position: Vec3,
}

pub fn default_specs() -> Vec<MarkerSpec> {
    MARKER_TABLE
        .iter()
        .map(|(name, panel, hex, pos)| MarkerSpec {
            name: (*name).to_string(),
            panel_id: (*panel).to_string(),
            color: color_from_hex(*hex),
            position: Vec3::from(*pos),
        })
        .collect()
}

/// How a marker is currently drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerVisual {
    Pending,
    Model,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerPart {
    Model,
    Ring,
    Crystal,
}

#[derive(Clone, Copy, Debug)]
pub struct HitShape {
    pub id: ShapeId,
    pub part: MarkerPart,
    /// Relative to the marker's animated position.
    pub local: Bounds,
}

/// Marker point light with the values it was created with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerLight {
    pub intensity: f32,
    pub range: f32,
    pub preset_intensity: f32,
    pub preset_range: f32,
}

impl MarkerLight {
    fn new(intensity: f32, range: f32) -> Self {
        Self {
            intensity,
            range,
            preset_intensity: intensity,
            preset_range: range,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,
    pub name: String,
    pub panel_id: String,
    pub color: Vec3,
    pub base_position: Vec3,
    /// Base position plus the current bob.
    pub position: Vec3,
    pub visual: MarkerVisual,
    pub crystal: CrystalShape,
    pub hovered: bool,
    pub emissive: f32,
    pub resting_emissive: f32,
    pub original_emissive: f32,
    pub scale: f32,
    pub ring_spin: f32,
    /// Euler angles (x tilt, y spin, z tilt).
    pub crystal_rotation: Vec3,
    pub crystal_height: f32,
    pub model_rotation: Vec3,
    pub model_spin_rate: Vec3,
    pub light: MarkerLight,
    pub shapes: SmallVec<[HitShape; 3]>,
}

impl Marker {
    pub fn crystal_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.crystal_height, 0.0)
    }
}

pub struct MarkerSet {
    markers: Vec<Marker>,
    owners: FnvHashMap<ShapeId, MarkerId>,
    hovered: Option<MarkerId>,
}

/// Build markers from specs; hit shapes and the owner map are fixed here.
pub fn create_markers(specs: &[MarkerSpec]) -> MarkerSet {
    let mut owners = FnvHashMap::default();
    let mut next_shape = 0u32;
    let markers = specs
        .iter()
        .enumerate()
        .map(|(id, spec)| {
            let mut shapes = SmallVec::new();
            let parts = [
                (
                    MarkerPart::Model,
                    Bounds::Sphere {
                        center: Vec3::ZERO,
                        radius: MODEL_HIT_RADIUS,
                    },
                ),
                (
                    MarkerPart::Ring,
                    // Flat box around the torus; its spin about Y stays inside it
                    Bounds::Aabb {
                        min: Vec3::new(-RING_RADIUS - RING_TUBE, -RING_TUBE, -RING_RADIUS - RING_TUBE),
                        max: Vec3::new(RING_RADIUS + RING_TUBE, RING_TUBE, RING_RADIUS + RING_TUBE),
                    },
                ),
                (
                    MarkerPart::Crystal,
                    Bounds::Sphere {
                        center: Vec3::new(0.0, CRYSTAL_HEIGHT, 0.0),
                        radius: CRYSTAL_HIT_RADIUS,
                    },
                ),
            ];
            for (part, local) in parts {
                let sid = ShapeId(next_shape);
                next_shape += 1;
                owners.insert(sid, id);
                shapes.push(HitShape {
                    id: sid,
                    part,
                    local,
                });
            }
            Marker {
                id,
                name: spec.name.clone(),
                panel_id: spec.panel_id.clone(),
                color: spec.color,
                base_position: spec.position,
                position: spec.position,
                visual: MarkerVisual::Pending,
                crystal: CrystalShape::for_marker(&spec.name),
                hovered: false,
                emissive: MARKER_EMISSIVE,
                resting_emissive: MARKER_EMISSIVE,
                original_emissive: MARKER_EMISSIVE,
                scale: 1.0,
                ring_spin: 0.0,
                crystal_rotation: Vec3::ZERO,
                crystal_height: CRYSTAL_HEIGHT,
                model_rotation: Vec3::ZERO,
                model_spin_rate: Vec3::new(
                    MODEL_SPIN_X_STEP * id as f32,
                    MODEL_SPIN_Y_PER_FRAME,
                    0.0,
                ),
                light: MarkerLight::new(MARKER_LIGHT_INTENSITY, MARKER_LIGHT_RANGE),
                shapes,
            }
        })
        .collect();
    MarkerSet {
        markers,
        owners,
        hovered: None,
    }
}

impl MarkerSet {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Marker> {
        self.markers.iter_mut()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn owner_of(&self, shape: ShapeId) -> Option<MarkerId> {
        self.owners.get(&shape).copied()
    }

    /// Hit shapes placed at each marker's current animated position.
    pub fn world_hit_shapes(&self) -> impl Iterator<Item = (ShapeId, Bounds)> + '_ {
        self.markers.iter().flat_map(|m| {
            m.shapes.iter().map(move |s| {
                let local = match s.part {
                    MarkerPart::Crystal => s.local.translated(Vec3::new(
                        0.0,
                        m.crystal_height - CRYSTAL_HEIGHT,
                        0.0,
                    )),
                    _ => s.local,
                };
                (s.id, local.translated(m.position))
            })
        })
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Returns true when the hovered marker changed.
    pub fn set_hovered(&mut self, id: Option<MarkerId>) -> bool {
        let id = id.filter(|i| *i < self.markers.len());
        if id == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered.and_then(|i| self.markers.get_mut(i)) {
            prev.hovered = false;
        }
        if let Some(next) = id.and_then(|i| self.markers.get_mut(i)) {
            next.hovered = true;
        }
        self.hovered = id;
        true
    }

    pub fn use_model(&mut self) {
        for m in &mut self.markers {
            m.visual = MarkerVisual::Model;
        }
    }

    /// Marker model failed to load: draw fallback spheres instead. Hit
    /// shapes stay as they were.
    pub fn use_fallback(&mut self) {
        for m in &mut self.markers {
            m.visual = MarkerVisual::Fallback;
        }
    }
}

/// Per-frame marker animation. `elapsed` is seconds since the session
/// started, `dt` seconds since the previous frame.
pub fn animate(set: &mut MarkerSet, elapsed: f32, dt: f32) {
    let t = elapsed;
    let decay = 1.0 - (-dt.max(0.0) * EMISSIVE_DECAY_PER_SEC).exp();
    for m in &mut set.markers {
        let i = m.id as f32;
        m.position = m.base_position
            + Vec3::new(0.0, (BOB_FREQUENCY * t + i).sin() * BOB_AMPLITUDE, 0.0);
        m.ring_spin += RING_SPIN_PER_FRAME;
        m.crystal_rotation.y += CRYSTAL_SPIN_PER_FRAME;
        m.crystal_rotation.x = (t + i).sin() * CRYSTAL_TILT;
        m.crystal_rotation.z = (t + i).cos() * CRYSTAL_TILT;
        m.crystal_height = CRYSTAL_HEIGHT + (3.0 * t + 0.5 * i).sin() * CRYSTAL_BOUNCE;
        m.model_rotation += m.model_spin_rate;

        if m.hovered {
            let pulse = (HOVER_PULSE_FREQUENCY * t).sin();
            m.emissive = m.resting_emissive + HOVER_PULSE_BOOST + pulse * HOVER_PULSE_DELTA;
            m.scale = 1.0 + pulse * HOVER_SCALE_DELTA;
        } else {
            m.emissive += (m.resting_emissive - m.emissive) * decay;
            m.scale = 1.0;
        }
    }
}
