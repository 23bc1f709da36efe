use super::Vec3;

/// Read-only camera snapshot in sphere space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Unit view direction.
    pub forward: Vec3,
}

impl CameraPose {
    /// Falls back to looking down -z when `forward` has no direction.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalized().unwrap_or(Vec3::new(0.0, 0.0, -1.0)),
        }
    }

    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Camera on the +z axis at `distance`, looking at the origin.
    pub fn orbiting_origin(distance: f64) -> Self {
        Self::new(Vec3::new(0.0, 0.0, distance), Vec3::new(0.0, 0.0, -1.0))
    }

    pub fn distance_to(&self, point: Vec3) -> f64 {
        self.position.distance(point)
    }
}
