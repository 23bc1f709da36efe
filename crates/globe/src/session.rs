use formats::geojson::FeatureCollection;
use formats::ingest::ingest_feature_collection;
use foundation::math::{GeoPoint, SURFACE_RADIUS, Vec3, to_geo_point};
use layers::boundaries::{BoundaryLayer, BoundaryLayerSnapshot};
use layers::labels::{LabelsLayer, LabelsLayerSnapshot};
use layers::symbology::LayerStyle;
use runtime::event_bus::{Event, EventBus, kinds};
use runtime::interaction::InteractionState;
use runtime::lifecycle::{DataLifecycle, LifecycleEvent};
use scene::picking::{Ray, intersect_sphere, pick_surface_point};
use scene::registry::CountryRegistry;
use tracing::{debug, info, warn};

use crate::config::GlobeConfig;
use crate::fetch::FetchError;

const BOUNDARY_LAYER_ID: u64 = 1;
const LABELS_LAYER_ID: u64 = 2;
/// Undrained events kept before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Everything derived from a successfully loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeData {
    pub registry: CountryRegistry,
    pub boundaries: BoundaryLayerSnapshot,
    pub labels: LabelsLayerSnapshot,
}

/// Single-threaded, frame-driven globe.
///
/// Before the dataset arrives (or after it failed) the globe renders with
/// no boundaries, no labels and no hit-testing. Hosts read events with
/// [`GlobeSession::drain_events`]; undrained events are capped at
/// [`MAX_PENDING_EVENTS`].
#[derive(Debug)]
pub struct GlobeSession {
    config: GlobeConfig,
    boundary_layer: BoundaryLayer,
    labels_layer: LabelsLayer,
    data: DataLifecycle<GlobeData>,
    interaction: InteractionState,
    events: EventBus,
    frame_index: u64,
}

impl GlobeSession {
    pub fn new(config: GlobeConfig) -> Self {
        let boundary_layer = BoundaryLayer::new(
            BOUNDARY_LAYER_ID,
            LayerStyle::boundaries().with_radius(config.boundary_radius),
        );
        let labels_layer = LabelsLayer::new(
            LABELS_LAYER_ID,
            LayerStyle::labels().with_radius(config.label_radius),
            config.labels,
        );
        Self {
            interaction: InteractionState::new(config.interaction),
            config,
            boundary_layer,
            labels_layer,
            data: DataLifecycle::new(),
            events: EventBus::bounded(MAX_PENDING_EVENTS),
            frame_index: 0,
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    /// Observers are told once, when the dataset becomes ready or fails.
    pub fn subscribe(&mut self, observer: impl FnMut(&LifecycleEvent<'_, GlobeData>) + 'static) {
        self.data.subscribe(observer);
    }

    pub fn load_collection(&mut self, collection: FeatureCollection) -> bool {
        if !self.data.is_pending() {
            warn!("dataset already settled; ignoring collection");
            return false;
        }

        let ingested = ingest_feature_collection(collection);
        let boundaries = self.boundary_layer.extract(&ingested.boundaries);
        let labels = self.labels_layer.extract(&ingested.registry);
        let summary = format!(
            "{} countries, {} boundary strips, {} labels",
            ingested.registry.len(),
            boundaries.lines.len(),
            labels.labels.len()
        );

        let ready = self.data.resolve(GlobeData {
            registry: ingested.registry,
            boundaries,
            labels,
        });
        if ready {
            info!(%summary, "globe data ready");
            self.events.emit(self.frame_index, kinds::DATA_READY, summary);
        }
        ready
    }

    pub fn fail_load(&mut self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        let failed = self.data.fail(reason.clone());
        if failed {
            self.events.emit(self.frame_index, kinds::DATA_FAILED, reason);
        }
        failed
    }

    /// Routes a fetch outcome into the lifecycle.
    pub fn apply_fetch(&mut self, result: Result<FeatureCollection, FetchError>) -> bool {
        match result {
            Ok(collection) => self.load_collection(collection),
            Err(err) => self.fail_load(err.to_string()),
        }
    }

    pub fn data(&self) -> Option<&GlobeData> {
        self.data.data()
    }

    pub fn load_failure(&self) -> Option<&str> {
        self.data.failure()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    /// Hit-tests a geographic coordinate directly, ignoring globe rotation.
    pub fn pick_geo(&self, point: GeoPoint) -> Option<&str> {
        self.data()?.registry.find_containing(point)
    }

    /// Resolves a world-space point on the globe surface to a country name.
    pub fn click_world(&mut self, point: Vec3) -> Option<String> {
        let Some(data) = self.data.data() else {
            debug!("click ignored; no data loaded");
            return None;
        };

        let local = self.interaction.orientation().apply_inverse(point);
        let hit = pick_surface_point(&data.registry, local).map(str::to_string);
        match &hit {
            Some(name) => {
                info!(country = %name, "clicked country");
                self.events.emit(self.frame_index, kinds::PICK_HIT, name.clone());
            }
            None => {
                let geo = to_geo_point(local);
                debug!(lon = geo.lon_deg(), lat = geo.lat_deg(), "clicked ocean or unknown area");
                self.events.emit(
                    self.frame_index,
                    kinds::PICK_MISS,
                    format!("{:.4},{:.4}", geo.lon_deg(), geo.lat_deg()),
                );
            }
        }
        hit
    }

    /// Like [`Self::click_world`] for a world-space ray; a ray that misses the globe picks nothing.
    pub fn click_ray(&mut self, ray: Ray) -> Option<String> {
        let point = intersect_sphere(ray, SURFACE_RADIUS)?;
        self.click_world(point)
    }

    /// Advances one frame and returns the number of visible labels.
    pub fn frame(&mut self) -> usize {
        self.interaction.tick();
        let camera = self.interaction.camera_pose();
        let orientation = self.interaction.orientation();

        let visible = match self.data.data_mut() {
            Some(data) => self
                .labels_layer
                .update(&mut data.labels.labels, &camera, orientation),
            None => 0,
        };
        self.frame_index += 1;
        visible
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn visible_labels(&self) -> impl Iterator<Item = &str> {
        self.data()
            .into_iter()
            .flat_map(|data| data.labels.visible())
            .map(|label| label.country.as_str())
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }
}
