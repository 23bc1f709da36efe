use foundation::math::{CameraPose, EarthOrientation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radians of globe rotation per pixel dragged.
    pub rotate_speed: f64,
    /// Press-to-release distance below which a release counts as a click.
    pub click_threshold_px: f64,
    /// Camera distance change per wheel unit.
    pub zoom_speed: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub initial_distance: f64,
    /// Yaw added every frame while not dragging; 0 disables auto-rotation.
    pub auto_rotate_speed: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            click_threshold_px: 5.0,
            zoom_speed: 0.001,
            min_distance: 1.5,
            max_distance: 5.0,
            initial_distance: 3.0,
            auto_rotate_speed: 0.0,
        }
    }
}

/// Pointer-driven camera and globe state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    config: InteractionConfig,
    orientation: EarthOrientation,
    camera_distance: f64,
    dragging: bool,
    press_px: [f64; 2],
    last_px: [f64; 2],
}

impl InteractionState {
    pub fn new(config: InteractionConfig) -> Self {
        let camera_distance = config
            .initial_distance
            .clamp(config.min_distance, config.max_distance);
        Self {
            config,
            orientation: EarthOrientation::default(),
            camera_distance,
            dragging: false,
            press_px: [0.0; 2],
            last_px: [0.0; 2],
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn orientation(&self) -> EarthOrientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: EarthOrientation) {
        self.orientation = orientation;
    }

    pub fn camera_distance(&self) -> f64 {
        self.camera_distance
    }

    /// Sets the distance directly, clamped to the configured range.
    pub fn set_camera_distance(&mut self, distance: f64) {
        self.camera_distance = distance.clamp(self.config.min_distance, self.config.max_distance);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Camera on +z at the current distance, looking at the globe centre.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::orbiting_origin(self.camera_distance)
    }

    pub fn pointer_down(&mut self, px: [f64; 2]) {
        self.dragging = true;
        self.press_px = px;
        self.last_px = px;
    }

    pub fn pointer_move(&mut self, px: [f64; 2]) {
        if !self.dragging {
            return;
        }
        let dx = px[0] - self.last_px[0];
        let dy = px[1] - self.last_px[1];
        self.orientation.yaw_rad += dx * self.config.rotate_speed;
        self.orientation.pitch_rad += dy * self.config.rotate_speed;
        self.last_px = px;
    }

    /// Ends the drag; returns the release position when it was a click.
    pub fn pointer_up(&mut self, px: [f64; 2]) -> Option<[f64; 2]> {
        let was_dragging = std::mem::replace(&mut self.dragging, false);
        if !was_dragging {
            return None;
        }
        let travelled = (px[0] - self.press_px[0]).hypot(px[1] - self.press_px[1]);
        (travelled < self.config.click_threshold_px).then_some(px)
    }

    pub fn pointer_leave(&mut self) {
        self.dragging = false;
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.set_camera_distance(self.camera_distance + delta_y * self.config.zoom_speed);
    }

    /// Per-frame update.
    pub fn tick(&mut self) {
        if !self.dragging {
            self.orientation.yaw_rad += self.config.auto_rotate_speed;
        }
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}
