use foundation::math::{GeoPoint, SpherePoint, to_sphere_point};
use scene::geometry::{CountryGeometry, Ring};
use tracing::debug;

use crate::layer::{Layer, LayerId};
use crate::symbology::LayerStyle;

/// Ordered sphere points of one ring, drawn as a line.
pub type LineStrip = Vec<SpherePoint>;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundaryLayer {
    id: LayerId,
    pub style: LayerStyle,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BoundaryLayerSnapshot {
    pub lines: Vec<LineStrip>,
}

impl BoundaryLayerSnapshot {
    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

impl BoundaryLayer {
    pub fn new(id: u64, style: LayerStyle) -> Self {
        Self {
            id: LayerId(id),
            style,
        }
    }

    pub fn extract(&self, geometries: &[CountryGeometry]) -> BoundaryLayerSnapshot {
        if !self.style.visible {
            return BoundaryLayerSnapshot::default();
        }

        let lines: Vec<LineStrip> = geometries
            .iter()
            .flat_map(|g| build_lines(g, self.style.radius))
            .collect();
        debug!(strips = lines.len(), "built boundary lines");
        BoundaryLayerSnapshot { lines }
    }
}

impl Layer for BoundaryLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn style(&self) -> LayerStyle {
        self.style
    }
}

/// One strip per ring, holes included; rings with fewer than two points are dropped.
pub fn build_lines(geometry: &CountryGeometry, radius: f64) -> Vec<LineStrip> {
    geometry
        .rings()
        .filter(|ring| ring.is_drawable())
        .map(|ring| project_ring(ring, radius))
        .collect()
}

fn project_ring(ring: &Ring, radius: f64) -> LineStrip {
    ring.points()
        .iter()
        .map(|p| to_sphere_point(*p, radius))
        .collect()
}

/// Arithmetic mean of the outer ring of the first polygon.
///
/// A plain coordinate average, good enough to place a label.
pub fn compute_centroid(geometry: &CountryGeometry) -> Option<GeoPoint> {
    let outer = geometry.primary_outer_ring()?;
    if outer.is_empty() {
        return None;
    }

    let (sum_lon, sum_lat) = outer
        .points()
        .iter()
        .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon_deg(), lat + p.lat_deg()));
    let n = outer.len() as f64;
    Some(GeoPoint::new(sum_lon / n, sum_lat / n))
}

#[cfg(test)]
mod tests {
    use super::{BoundaryLayer, build_lines, compute_centroid};
    use crate::layer::Layer;
    use crate::symbology::LayerStyle;
    use foundation::math::GeoPoint;
    use scene::geometry::{CountryGeometry, Polygon, Ring};

    fn ring(coords: &[(f64, f64)]) -> Ring {
        coords
            .iter()
            .map(|&(lon, lat)| GeoPoint::new(lon, lat))
            .collect()
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn square_with_hole() -> Polygon {
        Polygon::new(vec![
            ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]),
            ring(&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (4.0, 4.0)]),
        ])
    }

    #[test]
    fn polygon_yields_one_strip_per_ring() {
        let geom = CountryGeometry::Polygon(square_with_hole());
        let lines = build_lines(&geom, 1.01);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 5);
        assert_eq!(lines[1].len(), 4);
        for p in lines.iter().flatten() {
            assert_close(p.position().length(), 1.01, 1e-9);
        }
    }

    #[test]
    fn multipolygon_concatenates_and_drops_single_points() {
        let geom = CountryGeometry::MultiPolygon(vec![
            square_with_hole(),
            Polygon::new(vec![ring(&[(20.0, 20.0)])]),
            Polygon::new(vec![ring(&[(30.0, 30.0), (31.0, 31.0)])]),
        ]);
        let lines = build_lines(&geom, 1.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].len(), 2);
    }

    #[test]
    fn centroid_averages_outer_ring_only() {
        let geom = CountryGeometry::Polygon(Polygon::new(vec![
            ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            ring(&[(100.0, 80.0), (101.0, 80.0), (101.0, 81.0)]),
        ]));
        let c = compute_centroid(&geom).expect("centroid");
        assert_close(c.lon_deg(), 5.0, 1e-12);
        assert_close(c.lat_deg(), 5.0, 1e-12);
    }

    #[test]
    fn centroid_uses_first_polygon_of_multipolygon() {
        let geom = CountryGeometry::MultiPolygon(vec![
            Polygon::new(vec![ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])]),
            Polygon::new(vec![ring(&[(50.0, 50.0), (52.0, 50.0), (52.0, 52.0)])]),
        ]);
        let c = compute_centroid(&geom).expect("centroid");
        assert_close(c.lon_deg(), 1.0, 1e-12);
        assert_close(c.lat_deg(), 1.0, 1e-12);

        assert_eq!(compute_centroid(&CountryGeometry::MultiPolygon(Vec::new())), None);
        let empty = CountryGeometry::Polygon(Polygon::new(vec![Ring::default()]));
        assert_eq!(compute_centroid(&empty), None);
    }

    #[test]
    fn hidden_layer_extracts_nothing() {
        let geoms = vec![CountryGeometry::Polygon(square_with_hole())];
        let mut layer = BoundaryLayer::new(1, LayerStyle::boundaries());
        assert_eq!(layer.extract(&geoms).vertex_count(), 9);

        layer.style.visible = false;
        assert!(layer.extract(&geoms).lines.is_empty());
        assert_eq!(layer.style().radius, 1.01);
    }
}
