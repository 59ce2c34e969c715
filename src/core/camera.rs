use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR, CAMERA_START, LOOK_SENSITIVITY,
};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

/// A world-space ray with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// First-person camera: eye position plus yaw/pitch (radians).
///
/// Yaw 0 looks down -Z; positive pitch looks up. The "forward" used for
/// walking is the view direction projected onto the ground plane so that
/// looking up or down never changes walking speed.
#[derive(Clone, Copy, Debug)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: CAMERA_START,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FirstPersonCamera {
    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    #[inline]
    pub fn view_dir(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Horizontal forward unit vector.
    #[inline]
    pub fn ground_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right unit vector.
    #[inline]
    pub fn ground_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.ground_forward() * distance;
    }

    pub fn move_right(&mut self, distance: f32) {
        self.position += self.ground_right() * distance;
    }

    /// Apply a pointer/touch delta in pixels. Pitch is clamped to straight up/down.
    pub fn look(&mut self, dx_px: f32, dy_px: f32) {
        self.yaw -= dx_px * LOOK_SENSITIVITY;
        self.pitch -= dy_px * LOOK_SENSITIVITY;
        // look_to_rh degenerates when the view is exactly vertical
        let lim = std::f32::consts::FRAC_PI_2 - 1e-4;
        self.pitch = self.pitch.clamp(-lim, lim);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.view_dir(), Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            CAMERA_FOV_Y_DEG.to_radians(),
            aspect.max(1e-3),
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Compute a world-space ray through normalized device coordinates.
    ///
    /// - `ndc`: x right, y up, both in -1..1 (0,0 is the crosshair)
    /// - `aspect`: viewport width / height
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> Ray {
        let inv = self.view_proj(aspect).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let dir = (p1 - self.position).normalize_or_zero();
        Ray {
            origin: self.position,
            dir,
        }
    }
}

/// Map a pixel position inside a viewport to normalized device coordinates.
#[inline]
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((2.0 * x / width) - 1.0, 1.0 - (2.0 * y / height))
}
