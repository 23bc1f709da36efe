//! Spherical projection between geographic coordinates and sphere-space points.
//!
//! Sphere space is the frame of the rendered globe: +y through the north
//! pole, the prime meridian on +x and longitude growing towards -z.

use super::Vec3;

/// Radius of the rendered globe surface.
pub const SURFACE_RADIUS: f64 = 1.0;
/// Radius used for boundary lines (lifted to avoid z-fighting with the surface).
pub const BOUNDARY_RADIUS: f64 = 1.01;
/// Radius used for label anchors.
pub const LABEL_RADIUS: f64 = 1.02;

/// Geographic position in degrees.
///
/// Always normalized: longitude in `[-180, 180]`, latitude in `[-90, 90]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    lon_deg: f64,
    lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg: normalize_lon_deg(lon_deg),
            lat_deg: lat_deg.clamp(-90.0, 90.0),
        }
    }

    /// Polygon vertex: both axes are clamped, so a ring edge never jumps
    /// across the antimeridian.
    pub fn vertex(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg: lon_deg.clamp(-180.0, 180.0),
            lat_deg: lat_deg.clamp(-90.0, 90.0),
        }
    }

    pub fn lon_deg(self) -> f64 {
        self.lon_deg
    }

    pub fn lat_deg(self) -> f64 {
        self.lat_deg
    }
}

/// Point on a sphere of `radius`, derived from a [`GeoPoint`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpherePoint {
    position: Vec3,
    radius: f64,
}

impl SpherePoint {
    pub fn position(self) -> Vec3 {
        self.position
    }

    pub fn radius(self) -> f64 {
        self.radius
    }

    pub fn to_geo(self) -> GeoPoint {
        to_geo_point(self.position)
    }
}

/// Wraps out-of-range longitudes into `[-180, 180)`; in-range values are kept as is.
pub fn normalize_lon_deg(lon_deg: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon_deg) {
        lon_deg
    } else {
        (lon_deg + 180.0).rem_euclid(360.0) - 180.0
    }
}

pub fn to_sphere_point(geo: GeoPoint, radius: f64) -> SpherePoint {
    let phi = (90.0 - geo.lat_deg).to_radians();
    let theta = (geo.lon_deg + 180.0).to_radians();

    let position = Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    );
    SpherePoint { position, radius }
}

/// Inverse of [`to_sphere_point`].
///
/// The point is scaled onto the unit sphere first, so any point along the
/// same direction maps to the same coordinates. Near the poles the longitude
/// is arbitrary but always finite.
pub fn to_geo_point(p: Vec3) -> GeoPoint {
    let unit = p.normalized().unwrap_or(p);

    let lat_deg = unit.y.clamp(-1.0, 1.0).asin().to_degrees();
    // theta = lon + 180, so atan2(z, -x) is shifted back by half a turn.
    let lon_deg = (-unit.z).atan2(unit.x).to_degrees();

    GeoPoint::new(
        if lon_deg.is_finite() { lon_deg } else { 0.0 },
        if lat_deg.is_finite() { lat_deg } else { 0.0 },
    )
}
