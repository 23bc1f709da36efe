use foundation::math::{GeoPoint, Vec3, to_geo_point};

use crate::geometry::{CountryGeometry, Polygon, Ring};
use crate::registry::CountryRegistry;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

/// Crossing-number test with the half-open rule `(yi > lat) != (yj > lat)`.
///
/// A vertex lying exactly on the ray's latitude is counted for only one of
/// its two edges, so rays through vertices are never double-counted. Rings
/// with fewer than three points contain nothing.
pub fn ring_contains(ring: &Ring, point: GeoPoint) -> bool {
    let pts = ring.points();
    if !ring.can_contain() {
        return false;
    }

    let (lon, lat) = (point.lon_deg(), point.lat_deg());
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (xi, yi) = (pts[i].lon_deg(), pts[i].lat_deg());
        let (xj, yj) = (pts[j].lon_deg(), pts[j].lat_deg());
        if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Outer ring only; holes are not subtracted.
pub fn polygon_contains(polygon: &Polygon, point: GeoPoint) -> bool {
    polygon
        .outer()
        .is_some_and(|outer| ring_contains(outer, point))
}

pub fn geometry_contains(geometry: &CountryGeometry, point: GeoPoint) -> bool {
    match geometry {
        CountryGeometry::Polygon(polygon) => polygon_contains(polygon, point),
        CountryGeometry::MultiPolygon(polygons) => {
            polygons.iter().any(|p| polygon_contains(p, point))
        }
    }
}

/// Resolves a point on the globe surface (sphere-local frame) to a country name.
pub fn pick_surface_point(registry: &CountryRegistry, point: Vec3) -> Option<&str> {
    registry.find_containing(to_geo_point(point))
}

/// Nearest intersection of `ray` with a sphere centred at the origin.
///
/// Returns `None` when the ray misses or the sphere is entirely behind the
/// origin. A ray starting inside the sphere hits the far wall.
pub fn intersect_sphere(ray: Ray, radius: f64) -> Option<Vec3> {
    let dir = ray.dir.normalized()?;
    let b = ray.origin.dot(dir);
    let c = ray.origin.dot(ray.origin) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let sq = disc.sqrt();
    let t = [-b - sq, -b + sq].into_iter().find(|t| *t >= 0.0)?;
    Some(ray.origin + dir * t)
}
