use super::camera::FirstPersonCamera;
use crate::constants::{EYE_HEIGHT, EYE_SMOOTHING, FLY_FLOOR_Y, MOVE_DAMPING_RATE, MOVE_SPEED};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    Walking,
    Flying,
}

/// A movement intent bound to a physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

/// Map a `KeyboardEvent.code` to a movement intent. Up/down only exist
/// while flying.
#[inline]
pub fn intent_for_code(code: &str, mode: MoveMode) -> Option<Intent> {
    match code {
        "KeyW" | "ArrowUp" => Some(Intent::Forward),
        "KeyS" | "ArrowDown" => Some(Intent::Back),
        "KeyA" | "ArrowLeft" => Some(Intent::Left),
        "KeyD" | "ArrowRight" => Some(Intent::Right),
        "Space" if mode == MoveMode::Flying => Some(Intent::Up),
        "ShiftLeft" | "ShiftRight" if mode == MoveMode::Flying => Some(Intent::Down),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementParams {
    pub speed: f32,
    pub damping: f32,
    pub eye_height: f32,
    pub eye_smoothing: f32,
    pub fly_floor: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            speed: MOVE_SPEED,
            damping: MOVE_DAMPING_RATE,
            eye_height: EYE_HEIGHT,
            eye_smoothing: EYE_SMOOTHING,
            fly_floor: FLY_FLOOR_Y,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MovementState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub velocity: Vec3,
    pub direction: Vec3,
    pub mode: MoveMode,
    pub params: MovementParams,
}

impl MovementState {
    pub fn new(params: MovementParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        match intent {
            Intent::Forward => self.forward = active,
            Intent::Back => self.back = active,
            Intent::Left => self.left = active,
            Intent::Right => self.right = active,
            Intent::Up => self.up = active,
            Intent::Down => self.down = active,
        }
    }

    /// Switch mode; returns true when the mode actually changed.
    pub fn set_mode(&mut self, mode: MoveMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        if mode == MoveMode::Walking {
            self.up = false;
            self.down = false;
        }
        true
    }

    pub fn clear_intents(&mut self) {
        self.forward = false;
        self.back = false;
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }

    /// Normalized intent direction; zero when nothing (or opposing keys) is held.
    pub fn compute_direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| pos as i32 as f32 - neg as i32 as f32;
        let y = if self.mode == MoveMode::Flying {
            axis(self.up, self.down)
        } else {
            0.0
        };
        Vec3::new(axis(self.right, self.left), y, axis(self.forward, self.back)).normalize_or_zero()
    }

    /// Advance one frame with nominal timestep `delta`, moving `camera`.
    pub fn step(&mut self, camera: &mut FirstPersonCamera, delta: f32) {
        let p = self.params;
        self.velocity -= self.velocity * p.damping * delta;
        self.direction = self.compute_direction();

        if self.forward || self.back {
            self.velocity.z -= self.direction.z * p.speed * delta;
        }
        if self.left || self.right {
            self.velocity.x -= self.direction.x * p.speed * delta;
        }
        let flying = self.mode == MoveMode::Flying;
        if flying && (self.up || self.down) {
            self.velocity.y -= self.direction.y * p.speed * delta;
        }

        camera.move_right(-self.velocity.x * delta);
        camera.move_forward(-self.velocity.z * delta);

        if flying {
            camera.position.y -= self.velocity.y * delta;
            camera.position.y = camera.position.y.max(p.fly_floor);
        } else {
            camera.position.y += (p.eye_height - camera.position.y) * p.eye_smoothing;
        }
    }
}
