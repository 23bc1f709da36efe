use foundation::bounds::GeoBounds;
use foundation::math::GeoPoint;

/// Closed sequence of geographic points; the last point connects to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// At least two points are needed to draw a line loop.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Fewer than three points cannot enclose anything.
    pub fn can_contain(&self) -> bool {
        self.points.len() >= 3
    }
}

impl FromIterator<GeoPoint> for Ring {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Outer ring followed by zero or more holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn outer(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CountryGeometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl CountryGeometry {
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            CountryGeometry::Polygon(polygon) => std::slice::from_ref(polygon),
            CountryGeometry::MultiPolygon(polygons) => polygons,
        }
    }

    /// Every ring of every polygon, holes included.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.polygons().iter().flat_map(|p| p.rings().iter())
    }

    /// Outer ring of the first polygon.
    pub fn primary_outer_ring(&self) -> Option<&Ring> {
        self.polygons().first().and_then(Polygon::outer)
    }

    /// Bounds of the outer rings that can take part in containment tests.
    pub fn containment_bounds(&self) -> Option<GeoBounds> {
        self.polygons()
            .iter()
            .filter_map(Polygon::outer)
            .filter(|ring| ring.can_contain())
            .filter_map(|ring| GeoBounds::from_points(ring.points().iter().copied()))
            .reduce(GeoBounds::union)
    }
}
