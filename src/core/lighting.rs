use super::markers::MarkerSet;
use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    /// Sky color in `color`, ground color in `ground`.
    Hemisphere,
    Directional,
    Point,
    Spot,
}

/// A scene light that remembers the intensity/range it was created with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLight {
    pub kind: LightKind,
    pub color: Vec3,
    pub ground: Vec3,
    pub position: Vec3,
    pub intensity: f32,
    pub range: f32,
    pub preset_intensity: f32,
    pub preset_range: f32,
}

impl SceneLight {
    pub fn new(kind: LightKind, color: Vec3, position: Vec3, intensity: f32, range: f32) -> Self {
        Self {
            kind,
            color,
            ground: color,
            position,
            intensity,
            range,
            preset_intensity: intensity,
            preset_range: range,
        }
    }

    pub fn ambient(hex: u32, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color_from_hex(hex), Vec3::ZERO, intensity, 0.0)
    }

    pub fn hemisphere(sky: u32, ground: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            ground: color_from_hex(ground),
            ..Self::new(LightKind::Hemisphere, color_from_hex(sky), position, intensity, 0.0)
        }
    }

    pub fn directional(hex: u32, intensity: f32, position: Vec3) -> Self {
        Self::new(LightKind::Directional, color_from_hex(hex), position, intensity, 0.0)
    }

    /// Point light; a range of 0 means unlimited.
    pub fn point(hex: u32, intensity: f32, range: f32, position: Vec3) -> Self {
        Self::new(LightKind::Point, color_from_hex(hex), position, intensity, range)
    }

    pub fn restore(&mut self) {
        self.intensity = self.preset_intensity;
        self.range = self.preset_range;
    }
}

/// Background plus linear fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvironmentPreset {
    pub background: Vec3,
    pub fog_color: Vec3,
    pub fog_near: f32,
    pub fog_far: f32,
}

impl EnvironmentPreset {
    pub fn day() -> Self {
        Self {
            background: color_from_hex(DAY_BACKGROUND),
            fog_color: color_from_hex(DAY_FOG),
            fog_near: DAY_FOG_NEAR,
            fog_far: DAY_FOG_FAR,
        }
    }

    pub fn full_moon() -> Self {
        Self {
            background: color_from_hex(NIGHT_BACKGROUND),
            fog_color: color_from_hex(NIGHT_FOG),
            fog_near: NIGHT_FOG_NEAR,
            fog_far: NIGHT_FOG_FAR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullMoonCue {
    Start,
    Stop,
}

/// Default light rig; mobile gets a cheaper ambient + hemisphere pair.
pub fn default_lights(mobile: bool) -> Vec<SceneLight> {
    if mobile {
        return vec![
            SceneLight::ambient(0xffffff, 1.2),
            SceneLight::hemisphere(0xe8e8e8, 0xa8a8a8, 0.8, Vec3::new(0.0, 20.0, 0.0)),
        ];
    }
    vec![
        SceneLight::ambient(0xe8e8e8, 0.8),
        SceneLight::hemisphere(0xe8e8e8, 0xa8a8a8, 0.6, Vec3::new(0.0, 20.0, 0.0)),
        SceneLight::directional(0xd0f0ff, 1.2, Vec3::new(5.0, 10.0, 5.0)),
        SceneLight::point(0x00d4ff, 2.0, 35.0, Vec3::new(5.0, 3.0, 5.0)),
        SceneLight::point(0x4a9eff, 2.0, 35.0, Vec3::new(-5.0, 3.0, -5.0)),
    ]
}

pub struct LightingState {
    pub lights_on: bool,
    pub environment: EnvironmentPreset,
    lights: Vec<SceneLight>,
    full_moon_playing: bool,
}

impl LightingState {
    pub fn new(lights: Vec<SceneLight>) -> Self {
        Self {
            lights_on: true,
            environment: EnvironmentPreset::day(),
            lights,
            full_moon_playing: false,
        }
    }

    pub fn lights(&self) -> &[SceneLight] {
        &self.lights
    }

    /// Register a persistent light. Added while in full-moon mode it starts dark
    /// but keeps its preset for the way back.
    pub fn register(&mut self, mut light: SceneLight) -> usize {
        if !self.lights_on {
            light.intensity = 0.0;
        }
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Flip between day and full moon; returns the cue transition, if any.
    pub fn toggle(&mut self, markers: &mut MarkerSet) -> Option<FullMoonCue> {
        if self.lights_on {
            self.enter_full_moon(markers)
        } else {
            self.enter_day(markers)
        }
    }

    fn enter_full_moon(&mut self, markers: &mut MarkerSet) -> Option<FullMoonCue> {
        self.lights_on = false;
        self.environment = EnvironmentPreset::full_moon();
        for l in &mut self.lights {
            l.intensity = 0.0;
        }
        for m in markers.iter_mut() {
            m.resting_emissive = NIGHT_MARKER_EMISSIVE;
            m.light.intensity = NIGHT_MARKER_LIGHT_INTENSITY;
            m.light.range = NIGHT_MARKER_LIGHT_RANGE;
        }
        if self.full_moon_playing {
            return None;
        }
        self.full_moon_playing = true;
        Some(FullMoonCue::Start)
    }

    fn enter_day(&mut self, markers: &mut MarkerSet) -> Option<FullMoonCue> {
        self.lights_on = true;
        self.environment = EnvironmentPreset::day();
        for l in &mut self.lights {
            l.restore();
        }
        for m in markers.iter_mut() {
            m.resting_emissive = m.original_emissive;
            m.light.intensity = m.light.preset_intensity;
            m.light.range = m.light.preset_range;
        }
        let was_playing = std::mem::replace(&mut self.full_moon_playing, false);
        was_playing.then_some(FullMoonCue::Stop)
    }
}
