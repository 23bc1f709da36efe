use foundation::bounds::GeoBounds;
use foundation::math::GeoPoint;
use tracing::debug;

use crate::geometry::CountryGeometry;
use crate::picking::geometry_contains;

/// Named territory; immutable once registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    name: String,
    geometry: CountryGeometry,
    bounds: Option<GeoBounds>,
}

impl Country {
    /// Returns `None` for a blank name; otherwise the name is kept as given.
    pub fn new(name: impl Into<String>, geometry: CountryGeometry) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        let bounds = geometry.containment_bounds();
        Some(Self {
            name,
            geometry,
            bounds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &CountryGeometry {
        &self.geometry
    }

    pub fn bounds(&self) -> Option<GeoBounds> {
        self.bounds
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        match self.bounds {
            Some(b) if b.contains(point) => geometry_contains(&self.geometry, point),
            _ => false,
        }
    }
}

/// Append-only country store.
///
/// Ordering contract:
/// - Registration order is hit-test priority; the first containing country wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryRegistry {
    countries: Vec<Country>,
}

impl CountryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `country` and returns its registration index.
    pub fn register(&mut self, country: Country) -> usize {
        debug!(
            name = country.name(),
            polygons = country.geometry().polygons().len(),
            "registered country"
        );
        self.countries.push(country);
        self.countries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Country> {
        self.countries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// First registered country containing `point`, or `None` for ocean/unclaimed.
    pub fn find_containing(&self, point: GeoPoint) -> Option<&str> {
        self.countries
            .iter()
            .find(|c| c.contains(point))
            .map(Country::name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Country, CountryRegistry};
    use crate::geometry::{CountryGeometry, Polygon, Ring};
    use foundation::math::GeoPoint;

    fn square(min: f64, max: f64) -> CountryGeometry {
        let ring: Ring = [(min, min), (min, max), (max, max), (max, min)]
            .into_iter()
            .map(|(lon, lat)| GeoPoint::new(lon, lat))
            .collect();
        CountryGeometry::Polygon(Polygon::new(vec![ring]))
    }

    #[test]
    fn rejects_blank_names_and_keeps_others_verbatim() {
        assert!(Country::new("   ", square(0.0, 1.0)).is_none());
        let c = Country::new("  Padded ", square(0.0, 1.0)).expect("country");
        assert_eq!(c.name(), "  Padded ");
    }

    #[test]
    fn first_registered_country_wins_on_overlap() {
        let mut registry = CountryRegistry::new();
        registry.register(Country::new("A", square(0.0, 10.0)).expect("A"));
        registry.register(Country::new("B", square(5.0, 15.0)).expect("B"));

        assert_eq!(registry.find_containing(GeoPoint::new(7.0, 7.0)), Some("A"));
        assert_eq!(registry.find_containing(GeoPoint::new(12.0, 12.0)), Some("B"));
        assert_eq!(registry.find_containing(GeoPoint::new(30.0, 30.0)), None);
    }

    #[test]
    fn repeated_queries_are_stable() {
        let mut registry = CountryRegistry::new();
        registry.register(Country::new("A", square(0.0, 10.0)).expect("A"));
        let p = GeoPoint::new(3.0, 4.0);
        let first = registry.find_containing(p).map(str::to_string);
        for _ in 0..10 {
            assert_eq!(registry.find_containing(p).map(str::to_string), first);
        }
    }

    #[test]
    fn register_returns_sequential_indices() {
        let mut registry = CountryRegistry::new();
        assert!(registry.is_empty());
        let a = registry.register(Country::new("A", square(0.0, 1.0)).expect("A"));
        let b = registry.register(Country::new("A", square(2.0, 3.0)).expect("A again"));
        assert_eq!((a, b), (0, 1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).map(Country::name), Some("A"));
    }
}
