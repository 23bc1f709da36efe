use super::Vec3;

/// Rotation of the globe relative to the world frame (radians).
///
/// Applied as `Rx(pitch) * Ry(yaw)`: yaw spins the globe about its polar
/// axis, pitch then tilts it towards or away from the viewer.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EarthOrientation {
    pub pitch_rad: f64,
    pub yaw_rad: f64,
}

impl EarthOrientation {
    pub fn new(pitch_rad: f64, yaw_rad: f64) -> Self {
        Self { pitch_rad, yaw_rad }
    }

    pub fn from_degrees(pitch_deg: f64, yaw_deg: f64) -> Self {
        Self::new(pitch_deg.to_radians(), yaw_deg.to_radians())
    }

    /// Sphere-local to world.
    pub fn apply(self, v: Vec3) -> Vec3 {
        rotate_x(rotate_y(v, self.yaw_rad), self.pitch_rad)
    }

    /// World to sphere-local.
    pub fn apply_inverse(self, v: Vec3) -> Vec3 {
        rotate_y(rotate_x(v, -self.pitch_rad), -self.yaw_rad)
    }
}

fn rotate_x(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

fn rotate_y(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x * c + v.z * s, v.y, -v.x * s + v.z * c)
}
