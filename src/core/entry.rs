use super::lighting::SceneLight;
use glam::{EulerRot, Mat4, Quat, Vec3};

pub const ENTRY_CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const ENTRY_BACKGROUND: Vec3 = Vec3::ZERO;
pub const ENTRY_LOGO_SCALE: f32 = 1.5;

/// Spinning logo shown before the main session.
#[derive(Clone, Debug)]
pub struct EntryScene {
    pub rotation: Vec3,
    pub show_logo: bool,
    pub lights: Vec<SceneLight>,
}

impl EntryScene {
    /// The logo is skipped on mobile.
    pub fn new(mobile: bool) -> Self {
        Self {
            rotation: Vec3::ZERO,
            show_logo: !mobile,
            lights: vec![
                SceneLight::ambient(0xc0c0c0, 0.7),
                SceneLight::point(0x00d4ff, 2.5, 12.0, Vec3::new(2.0, 2.0, 2.0)),
                SceneLight::point(0x4a9eff, 2.5, 12.0, Vec3::new(-2.0, -2.0, 2.0)),
                SceneLight::point(0xe8e8e8, 2.0, 10.0, Vec3::new(0.0, 0.0, -2.0)),
            ],
        }
    }

    /// One animation frame at `elapsed` seconds.
    pub fn update(&mut self, elapsed: f32) {
        self.rotation.y += 0.01;
        self.rotation.x = elapsed.sin() * 0.1;
    }

    pub fn logo_transform(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_scale_rotation_translation(Vec3::splat(ENTRY_LOGO_SCALE), rot, Vec3::ZERO)
    }

    pub fn view_proj(aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(75f32.to_radians(), aspect.max(1e-3), 0.1, 1000.0);
        proj * Mat4::look_at_rh(ENTRY_CAMERA_EYE, Vec3::ZERO, Vec3::Y)
    }
}
