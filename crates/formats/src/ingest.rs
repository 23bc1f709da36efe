use scene::geometry::CountryGeometry;
use scene::registry::{Country, CountryRegistry};
use tracing::{debug, warn};

use crate::geojson::FeatureCollection;

/// Result of loading a FeatureCollection once at startup.
#[derive(Debug, Clone, Default)]
pub struct IngestedCountries {
    /// Named features in document order.
    pub registry: CountryRegistry,
    /// Geometry of every feature, named or not, for boundary rendering.
    pub boundaries: Vec<CountryGeometry>,
}

/// Splits a collection into drawable boundaries and the hit-test registry.
///
/// A feature without a usable name is still drawn but never registered or
/// labelled.
pub fn ingest_feature_collection(collection: FeatureCollection) -> IngestedCountries {
    let mut out = IngestedCountries {
        registry: CountryRegistry::new(),
        boundaries: Vec::with_capacity(collection.features.len()),
    };

    let mut unnamed = 0usize;
    for feature in collection.features {
        let country = feature
            .name()
            .and_then(|name| Country::new(name, feature.geometry.clone()));
        match country {
            Some(country) => {
                out.registry.register(country);
            }
            None => unnamed += 1,
        }
        out.boundaries.push(feature.geometry);
    }

    if unnamed > 0 {
        warn!(unnamed, "features without a name are drawn but not pickable");
    }
    debug!(
        countries = out.registry.len(),
        boundaries = out.boundaries.len(),
        "ingested feature collection"
    );
    out
}
