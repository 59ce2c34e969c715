// Host-side tests for the day / full-moon lighting toggle.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod scene {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod commands {
        include!("../src/core/commands.rs");
    }
    pub mod drawlist {
        include!("../src/core/drawlist.rs");
    }
    pub mod effects {
        include!("../src/core/effects.rs");
    }
    pub mod entry {
        include!("../src/core/entry.rs");
    }
    pub mod lighting {
        include!("../src/core/lighting.rs");
    }
    pub mod loading {
        include!("../src/core/loading.rs");
    }
    pub mod markers {
        include!("../src/core/markers.rs");
    }
    pub mod models {
        include!("../src/core/models.rs");
    }
    pub mod movement {
        include!("../src/core/movement.rs");
    }
    pub mod panels {
        include!("../src/core/panels.rs");
    }
    pub mod picking {
        include!("../src/core/picking.rs");
    }
    pub mod session {
        include!("../src/core/session.rs");
    }
    pub mod shapes {
        include!("../src/core/shapes.rs");
    }
}

use constants::*;
use glam::Vec3;
use scene::lighting::*;
use scene::markers::{create_markers, default_specs, MarkerSet};

fn rig(mobile: bool) -> (LightingState, MarkerSet) {
    (
        LightingState::new(default_lights(mobile)),
        create_markers(&default_specs()),
    )
}

#[test]
fn full_moon_darkens_lights_and_brightens_markers() {
    let (mut lighting, mut markers) = rig(false);
    assert_eq!(lighting.toggle(&mut markers), Some(FullMoonCue::Start));
    assert!(!lighting.lights_on);
    assert!(lighting.lights().iter().all(|l| l.intensity == 0.0));
    assert_eq!(lighting.environment, EnvironmentPreset::full_moon());
    for m in markers.iter() {
        assert_eq!(m.resting_emissive, NIGHT_MARKER_EMISSIVE);
        assert_eq!(m.light.intensity, NIGHT_MARKER_LIGHT_INTENSITY);
        assert_eq!(m.light.range, NIGHT_MARKER_LIGHT_RANGE);
    }
}

#[test]
fn toggling_twice_restores_every_light() {
    for mobile in [false, true] {
        let (mut lighting, mut markers) = rig(mobile);
        lighting.register(SceneLight::point(0xffffff, 4.0, 60.0, Vec3::new(0.0, 10.0, 0.0)));
        let before_lights = lighting.lights().to_vec();
        let before_markers: Vec<_> = markers
            .iter()
            .map(|m| (m.resting_emissive, m.light))
            .collect();

        lighting.toggle(&mut markers);
        assert_eq!(lighting.toggle(&mut markers), Some(FullMoonCue::Stop));

        assert!(lighting.lights_on);
        assert_eq!(lighting.lights(), &before_lights[..]);
        assert_eq!(lighting.environment, EnvironmentPreset::day());
        let after_markers: Vec<_> = markers
            .iter()
            .map(|m| (m.resting_emissive, m.light))
            .collect();
        assert_eq!(after_markers, before_markers);
    }
}

#[test]
fn restore_uses_stored_preset_not_color() {
    // Two lights sharing a color but with different presets
    let lights = vec![
        SceneLight::point(0x00d4ff, 2.0, 35.0, Vec3::ZERO),
        SceneLight::point(0x00d4ff, 7.0, 12.0, Vec3::ONE),
    ];
    let mut lighting = LightingState::new(lights);
    let mut markers = create_markers(&default_specs());
    lighting.toggle(&mut markers);
    lighting.toggle(&mut markers);
    assert_eq!(lighting.lights()[0].intensity, 2.0);
    assert_eq!(lighting.lights()[1].intensity, 7.0);
    assert_eq!(lighting.lights()[1].range, 12.0);
}

#[test]
fn light_registered_in_full_moon_starts_dark_and_restores() {
    let (mut lighting, mut markers) = rig(false);
    lighting.toggle(&mut markers);
    let idx = lighting.register(SceneLight::point(SECRET_LIGHT_COLOR, 2.0, 10.0, SECRET_LIGHT_POSITION));
    assert_eq!(lighting.lights()[idx].intensity, 0.0);
    lighting.toggle(&mut markers);
    assert_eq!(lighting.lights()[idx].intensity, 2.0);
}

#[test]
fn full_moon_cue_alternates_start_and_stop() {
    let (mut lighting, mut markers) = rig(false);
    let cues: Vec<_> = (0..4).map(|_| lighting.toggle(&mut markers)).collect();
    assert_eq!(
        cues,
        vec![
            Some(FullMoonCue::Start),
            Some(FullMoonCue::Stop),
            Some(FullMoonCue::Start),
            Some(FullMoonCue::Stop),
        ]
    );
}

#[test]
fn mobile_rig_is_smaller() {
    assert!(default_lights(true).len() < default_lights(false).len());
    assert!(default_lights(true)
        .iter()
        .all(|l| matches!(l.kind, LightKind::Ambient | LightKind::Hemisphere)));
}

#[test]
fn mobile_hemisphere_uses_grey_sky_and_ground() {
    let hemi = default_lights(true)
        .into_iter()
        .find(|l| l.kind == LightKind::Hemisphere)
        .unwrap();
    assert_eq!(hemi.color, color_from_hex(0xe8e8e8));
    assert_eq!(hemi.ground, color_from_hex(0xa8a8a8));
    assert_eq!(hemi.intensity, 0.8);
}
