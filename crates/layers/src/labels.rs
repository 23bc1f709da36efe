use foundation::math::{CameraPose, EarthOrientation, SpherePoint, Vec3, to_sphere_point};
use scene::registry::CountryRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::boundaries::compute_centroid;
use crate::layer::{Layer, LayerId};
use crate::symbology::LayerStyle;

/// Per-frame label culling thresholds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelVisibilityConfig {
    /// Labels are only shown while the camera is closer to the globe centre than this.
    pub zoom_threshold: f64,
    /// Minimum cosine between the camera forward vector and the direction to the label.
    pub facing_threshold: f64,
    /// Extra distance allowed beyond the globe centre before a label is culled.
    pub forward_slack: f64,
}

impl Default for LabelVisibilityConfig {
    fn default() -> Self {
        Self {
            zoom_threshold: 2.5,
            facing_threshold: 0.3,
            forward_slack: 1.5,
        }
    }
}

/// Country label anchored in the sphere-local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    pub country: String,
    pub position: SpherePoint,
    pub visible: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelsLayerSnapshot {
    pub labels: Vec<LabelAnchor>,
}

impl LabelsLayerSnapshot {
    pub fn visible(&self) -> impl Iterator<Item = &LabelAnchor> {
        self.labels.iter().filter(|l| l.visible)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelsLayer {
    id: LayerId,
    pub style: LayerStyle,
    pub config: LabelVisibilityConfig,
}

impl LabelsLayer {
    pub fn new(id: u64, style: LayerStyle, config: LabelVisibilityConfig) -> Self {
        Self {
            id: LayerId(id),
            style,
            config,
        }
    }

    /// One hidden anchor per registered country with a centroid, in registration order.
    pub fn extract(&self, registry: &CountryRegistry) -> LabelsLayerSnapshot {
        if !self.style.visible {
            return LabelsLayerSnapshot::default();
        }

        let labels: Vec<LabelAnchor> = registry
            .iter()
            .filter_map(|country| {
                let centroid = compute_centroid(country.geometry())?;
                Some(LabelAnchor {
                    country: country.name().to_string(),
                    position: to_sphere_point(centroid, self.style.radius),
                    visible: false,
                })
            })
            .collect();
        debug!(labels = labels.len(), "extracted label anchors");
        LabelsLayerSnapshot { labels }
    }

    /// Recomputes every anchor's visibility for this frame and returns the visible count.
    pub fn update(
        &self,
        anchors: &mut [LabelAnchor],
        camera: &CameraPose,
        orientation: EarthOrientation,
    ) -> usize {
        update_label_visibility(anchors, camera, orientation, &self.config)
    }
}

impl Layer for LabelsLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn style(&self) -> LayerStyle {
        self.style
    }
}

/// Visibility rules, applied to each anchor:
/// - zoomed out (camera at or beyond `zoom_threshold` from the centre): hidden
/// - otherwise the rotated anchor must lie in front of the camera and no
///   further than the globe centre plus `forward_slack`
pub fn update_label_visibility(
    anchors: &mut [LabelAnchor],
    camera: &CameraPose,
    orientation: EarthOrientation,
    config: &LabelVisibilityConfig,
) -> usize {
    let center_distance = camera.position.length();
    let zoomed_in = center_distance < config.zoom_threshold;

    let mut visible = 0;
    for anchor in anchors.iter_mut() {
        anchor.visible = zoomed_in && {
            let world = orientation.apply(anchor.position.position());
            is_in_view(world, camera, center_distance, config)
        };
        if anchor.visible {
            visible += 1;
        }
    }
    trace!(visible, total = anchors.len(), zoomed_in, "updated label visibility");
    visible
}

fn is_in_view(
    world: Vec3,
    camera: &CameraPose,
    center_distance: f64,
    config: &LabelVisibilityConfig,
) -> bool {
    let to_label = world - camera.position;
    let Some(dir) = to_label.normalized() else {
        return false;
    };
    dir.dot(camera.forward) > config.facing_threshold
        && to_label.length() < center_distance + config.forward_slack
}
