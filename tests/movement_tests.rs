// Host-side tests for first-person movement and camera look.
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
use scene::camera::FirstPersonCamera;
use scene::movement::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn state_from_mask(mask: u8, mode: MoveMode) -> MovementState {
    let mut s = MovementState::new(MovementParams::default());
    s.mode = mode;
    s.forward = mask & 1 != 0;
    s.back = mask & 2 != 0;
    s.left = mask & 4 != 0;
    s.right = mask & 8 != 0;
    s.up = mask & 16 != 0;
    s.down = mask & 32 != 0;
    s
}

#[test]
fn direction_never_exceeds_unit_length() {
    for mode in [MoveMode::Walking, MoveMode::Flying] {
        for mask in 0u8..64 {
            let d = state_from_mask(mask, mode).compute_direction();
            assert!(d.length() <= 1.0 + 1e-5, "mask {mask:#b} gave {d:?}");
            if mask == 0 {
                assert_eq!(d, Vec3::ZERO);
            }
        }
    }
}

#[test]
fn walking_ignores_vertical_intents() {
    let s = state_from_mask(16 | 1, MoveMode::Walking);
    let d = s.compute_direction();
    assert_eq!(d.y, 0.0);
    assert!(approx(d.z, 1.0));
}

#[test]
fn opposing_keys_cancel() {
    let mut s = state_from_mask(1 | 2 | 4 | 8, MoveMode::Walking);
    assert_eq!(s.compute_direction(), Vec3::ZERO);
    let mut cam = FirstPersonCamera::default();
    let start = cam.position;
    s.step(&mut cam, MOVE_DELTA);
    assert!(approx(cam.position.x, start.x));
    assert!(approx(cam.position.z, start.z));
}

#[test]
fn forward_moves_along_view_on_ground_plane() {
    let mut s = MovementState::new(MovementParams::default());
    s.set_intent(Intent::Forward, true);
    let mut cam = FirstPersonCamera::default();
    cam.pitch = 0.8; // looking up must not change horizontal travel
    let start = cam.position;
    s.step(&mut cam, MOVE_DELTA);
    // velocity.z = -speed * delta, then moved by -v.z * delta
    let expected = MOVE_SPEED * MOVE_DELTA * MOVE_DELTA;
    assert!(approx(start.z - cam.position.z, expected));
    assert!(approx(cam.position.x, start.x));
}

#[test]
fn strafing_right_follows_yaw() {
    let mut s = MovementState::new(MovementParams::default());
    s.set_intent(Intent::Right, true);
    let mut cam = FirstPersonCamera::default();
    cam.yaw = std::f32::consts::FRAC_PI_2; // facing -X, so right is -Z
    let start = cam.position;
    s.step(&mut cam, MOVE_DELTA);
    assert!(cam.position.z < start.z);
    assert!(approx(cam.position.x, start.x));
}

#[test]
fn velocity_damps_out_without_input() {
    let mut s = MovementState::new(MovementParams::default());
    s.velocity = Vec3::new(3.0, 0.0, -5.0);
    let mut cam = FirstPersonCamera::default();
    s.step(&mut cam, MOVE_DELTA);
    // damping 10 at delta 0.1 removes all velocity in one step
    assert!(s.velocity.length() < 1e-5);
}

#[test]
fn walking_eases_toward_eye_height() {
    let mut s = MovementState::new(MovementParams::default());
    let mut cam = FirstPersonCamera::default();
    let y0 = cam.position.y;
    s.step(&mut cam, MOVE_DELTA);
    assert!(approx(cam.position.y, y0 + (EYE_HEIGHT - y0) * EYE_SMOOTHING));
    for _ in 0..200 {
        s.step(&mut cam, MOVE_DELTA);
    }
    assert!(approx(cam.position.y, EYE_HEIGHT));
}

#[test]
fn flying_up_raises_and_down_stops_at_floor() {
    let mut s = MovementState::new(MovementParams::default());
    assert!(s.set_mode(MoveMode::Flying));
    let mut cam = FirstPersonCamera::default();
    let y0 = cam.position.y;

    s.set_intent(Intent::Up, true);
    s.step(&mut cam, MOVE_DELTA);
    assert!(cam.position.y > y0);

    s.set_intent(Intent::Up, false);
    s.set_intent(Intent::Down, true);
    for _ in 0..100 {
        s.step(&mut cam, MOVE_DELTA);
        assert!(cam.position.y >= FLY_FLOOR_Y);
    }
    assert!(approx(cam.position.y, FLY_FLOOR_Y));
}

#[test]
fn entering_walking_clears_vertical_intents() {
    let mut s = MovementState::new(MovementParams::default());
    s.set_mode(MoveMode::Flying);
    s.set_intent(Intent::Up, true);
    s.set_intent(Intent::Down, true);
    s.set_intent(Intent::Forward, true);
    assert!(s.set_mode(MoveMode::Walking));
    assert!(!s.up && !s.down);
    assert!(s.forward);
    assert!(!s.set_mode(MoveMode::Walking));
}

#[test]
fn vertical_keys_only_map_while_flying() {
    assert_eq!(intent_for_code("Space", MoveMode::Walking), None);
    assert_eq!(intent_for_code("ShiftLeft", MoveMode::Walking), None);
    assert_eq!(intent_for_code("Space", MoveMode::Flying), Some(Intent::Up));
    assert_eq!(intent_for_code("ShiftRight", MoveMode::Flying), Some(Intent::Down));
    assert_eq!(intent_for_code("ArrowUp", MoveMode::Walking), Some(Intent::Forward));
    assert_eq!(intent_for_code("KeyA", MoveMode::Flying), Some(Intent::Left));
    assert_eq!(intent_for_code("KeyQ", MoveMode::Flying), None);
}

#[test]
fn look_clamps_pitch() {
    let mut cam = FirstPersonCamera::default();
    cam.look(0.0, -1.0e6);
    assert!(cam.pitch <= std::f32::consts::FRAC_PI_2);
    assert!(cam.pitch > 1.5);
    cam.look(0.0, 1.0e6);
    assert!(cam.pitch >= -std::f32::consts::FRAC_PI_2);
    assert!(cam.pitch < -1.5);
    cam.look(100.0, 0.0);
    assert!(approx(cam.yaw, -100.0 * LOOK_SENSITIVITY));
}
