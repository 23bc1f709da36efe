use crate::math::GeoPoint;

/// Axis-aligned bounds in longitude/latitude degrees.
///
/// Used as a cheap pre-filter before exact containment tests; it does not
/// model antimeridian wrap, so a box spanning it simply covers all longitudes
/// between its extremes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl GeoBounds {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        GeoBounds { min, max }
    }

    /// Smallest box holding every point, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut out: Option<GeoBounds> = None;
        for p in points {
            let (lon, lat) = (p.lon_deg(), p.lat_deg());
            out = Some(match out {
                None => GeoBounds::new([lon, lat], [lon, lat]),
                Some(b) => GeoBounds::new(
                    [b.min[0].min(lon), b.min[1].min(lat)],
                    [b.max[0].max(lon), b.max[1].max(lat)],
                ),
            });
        }
        out
    }

    pub fn union(self, other: Self) -> Self {
        GeoBounds::new(
            [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        )
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: GeoPoint) -> bool {
        let (lon, lat) = (p.lon_deg(), p.lat_deg());
        lon >= self.min[0] && lon <= self.max[0] && lat >= self.min[1] && lat <= self.max[1]
    }
}
