use foundation::math::{BOUNDARY_RADIUS, LABEL_RADIUS};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub visible: bool,
    pub color: [f32; 4],
    /// Sphere radius the layer is projected onto; above 1.0 to stay clear of the surface.
    pub radius: f64,
}

impl LayerStyle {
    pub const fn new(visible: bool, color: [f32; 4], radius: f64) -> Self {
        Self {
            visible,
            color,
            radius,
        }
    }

    /// Faint white country outlines.
    pub const fn boundaries() -> Self {
        Self::new(true, [1.0, 1.0, 1.0, 0.3], BOUNDARY_RADIUS)
    }

    pub const fn labels() -> Self {
        Self::new(true, [1.0, 1.0, 1.0, 0.8], LABEL_RADIUS)
    }

    pub const fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self::boundaries()
    }
}
