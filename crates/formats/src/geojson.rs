use foundation::math::GeoPoint;
use scene::geometry::{CountryGeometry, Polygon, Ring};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Property keys tried, in order, for a feature's display name.
pub const NAME_KEYS: [&str; 2] = ["ADMIN", "name"];

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: CountryGeometry,
}

impl Feature {
    /// First non-blank string among [`NAME_KEYS`], as written in the dataset.
    pub fn name(&self) -> Option<&str> {
        NAME_KEYS.iter().find_map(|key| {
            self.properties
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
    }
}

/// Area features of a GeoJSON FeatureCollection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    /// Features dropped because their geometry is missing, malformed or not an area.
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_slice(payload: &[u8]) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_slice(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, GeoJsonError> {
        let obj = value
            .as_object()
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(Value::as_array)
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut out = FeatureCollection {
            features: Vec::with_capacity(features_val.len()),
            skipped: 0,
        };
        for (index, feat_val) in features_val.iter().enumerate() {
            match parse_feature(feat_val) {
                Ok(Some(feature)) => out.features.push(feature),
                Ok(None) => out.skipped += 1,
                Err(reason) => {
                    let err = GeoJsonError::InvalidFeature { index, reason };
                    warn!(index, error = %err, "skipping malformed feature");
                    out.skipped += 1;
                }
            }
        }

        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn parse_feature(value: &Value) -> Result<Option<Feature>, String> {
    let obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;

    let feat_type = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or("feature missing type".to_string())?;
    if feat_type != "Feature" {
        return Err(format!("unexpected feature type: {feat_type}"));
    }

    let id = match obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let Some(geometry_obj) = obj.get("geometry").and_then(Value::as_object) else {
        warn!(id = id.as_deref(), "skipping feature without geometry");
        return Ok(None);
    };
    let geometry_type = geometry_obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or("geometry missing type".to_string())?;
    let coords = || {
        geometry_obj
            .get("coordinates")
            .ok_or("geometry missing coordinates".to_string())
    };

    let geometry = match geometry_type {
        "Polygon" => CountryGeometry::Polygon(parse_polygon(coords()?)?),
        "MultiPolygon" => CountryGeometry::MultiPolygon(parse_multi_polygon(coords()?)?),
        other => {
            warn!(
                id = id.as_deref(),
                geometry = other,
                "skipping feature with non-area geometry"
            );
            return Ok(None);
        }
    };

    Ok(Some(Feature {
        id,
        properties,
        geometry,
    }))
}

fn parse_position(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::vertex(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Polygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let rings = rings.iter().map(parse_ring).collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(rings))
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Polygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, GeoJsonError};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;
    use scene::geometry::CountryGeometry;

    const TWO_COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 7,
                "properties": { "ADMIN": "Squareland", "name": "ignored" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Islands" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[20, 20], [20, 21], [21, 21], [20, 20]]],
                        [[[30, 30], [30, 31, 12.5], [31, 31], [30, 30]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_polygons_and_multipolygons() {
        let fc = FeatureCollection::from_geojson_str(TWO_COUNTRIES).expect("parse");
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.skipped, 0);

        let first = &fc.features[0];
        assert_eq!(first.id.as_deref(), Some("7"));
        let CountryGeometry::Polygon(poly) = &first.geometry else {
            panic!("expected polygon");
        };
        assert_eq!(poly.rings().len(), 1);
        assert_eq!(poly.rings()[0].points()[1], GeoPoint::new(0.0, 10.0));

        let CountryGeometry::MultiPolygon(polys) = &fc.features[1].geometry else {
            panic!("expected multipolygon");
        };
        assert_eq!(polys.len(), 2);
        // Altitude is ignored.
        assert_eq!(polys[1].rings()[0].points()[1], GeoPoint::new(30.0, 31.0));
    }

    #[test]
    fn name_prefers_admin_then_name() {
        let fc = FeatureCollection::from_geojson_str(TWO_COUNTRIES).expect("parse");
        assert_eq!(fc.features[0].name(), Some("Squareland"));
        assert_eq!(fc.features[1].name(), Some("Islands"));
    }

    #[test]
    fn blank_admin_falls_back_and_missing_names_are_none() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "ADMIN": "  ", "name": "Fallback" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] } },
                { "type": "Feature", "properties": null,
                  "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] } }
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(fc.features[0].name(), Some("Fallback"));
        assert_eq!(fc.features[1].name(), None);
    }

    #[test]
    fn skips_non_area_and_missing_geometry() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [1, 2] } },
                { "type": "Feature", "properties": {}, "geometry": null },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] } }
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.skipped, 2);
    }

    #[test]
    fn rejects_documents_that_are_not_feature_collections() {
        let err = FeatureCollection::from_geojson_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));

        let err = FeatureCollection::from_geojson_str("[1, 2").unwrap_err();
        assert!(matches!(err, GeoJsonError::Json(_)));
    }

    #[test]
    fn malformed_feature_is_skipped_and_the_rest_kept() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "ADMIN": "Testland" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [0, 10], [10, 10], [10, 0]]] } },
                { "type": "Feature", "properties": { "ADMIN": "Broken" },
                  "geometry": { "type": "Polygon", "coordinates": [[[20, 20], [20], [21, 21]]] } },
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [[["a", 0]]] } }
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.skipped, 2);
        assert_eq!(fc.features[0].name(), Some("Testland"));
    }

    #[test]
    fn antimeridian_vertices_are_clamped_not_wrapped() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "ADMIN": "Edge" },
                  "geometry": { "type": "Polygon",
                                "coordinates": [[[170, 0], [180.000001, 0], [180.000001, 10], [170, 10]]] } }
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).expect("parse");
        let CountryGeometry::Polygon(poly) = &fc.features[0].geometry else {
            panic!("expected polygon");
        };
        let lons: Vec<f64> = poly.rings()[0].points().iter().map(|p| p.lon_deg()).collect();
        assert_eq!(lons, vec![170.0, 180.0, 180.0, 170.0]);
    }

    #[test]
    fn names_keep_their_original_spelling() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "ADMIN": "  Padded " },
                  "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] } }
            ]
        }"#;
        let fc = FeatureCollection::from_geojson_str(payload).expect("parse");
        assert_eq!(fc.features[0].name(), Some("  Padded "));
    }
}
