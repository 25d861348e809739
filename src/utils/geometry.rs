use geo::Centroid;
use geojson::{Geometry, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Planar centroid of a GeoJSON geometry in its own coordinate space.
///
/// Polygons are area-weighted per part, so ring winding does not matter;
/// zero-area shapes fall back to their outlines, then their vertices.
pub fn centroid(geometry: &Geometry) -> Option<LatLon> {
    if !positions_are_planar(&geometry.value) {
        return None;
    }

    let shape = geo::Geometry::<f64>::try_from(geometry).ok()?;
    let point = shape.centroid()?;

    (point.x().is_finite() && point.y().is_finite()).then_some(LatLon {
        lat: point.y(),
        lon: point.x(),
    })
}

// Every position needs at least x and y for the geo conversion.
fn positions_are_planar(value: &Value) -> bool {
    let ok = |p: &Vec<f64>| p.len() >= 2;
    match value {
        Value::Point(p) => ok(p),
        Value::MultiPoint(points) | Value::LineString(points) => points.iter().all(ok),
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            lines.iter().flatten().all(ok)
        }
        Value::MultiPolygon(polygons) => polygons.iter().flatten().flatten().all(ok),
        Value::GeometryCollection(geometries) => {
            geometries.iter().all(|g| positions_are_planar(&g.value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Vec<f64>> {
        vec![
            vec![x0, y0],
            vec![x0 + size, y0],
            vec![x0 + size, y0 + size],
            vec![x0, y0 + size],
            vec![x0, y0],
        ]
    }

    fn clockwise_square(x0: f64, y0: f64, size: f64) -> Vec<Vec<f64>> {
        let mut ring = square(x0, y0, size);
        ring.reverse();
        ring
    }

    #[test]
    fn test_square_centroid() {
        let geometry = Geometry::new(Value::Polygon(vec![square(-88.0, 32.0, 2.0)]));
        let c = centroid(&geometry).unwrap();
        assert!((c.lon - -87.0).abs() < 1e-9);
        assert!((c.lat - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_shifts_centroid() {
        let outer = square(0.0, 0.0, 4.0);
        let hole = clockwise_square(2.0, 1.5, 1.0);
        let geometry = Geometry::new(Value::Polygon(vec![outer, hole]));
        let c = centroid(&geometry).unwrap();
        assert!(c.lon < 2.0);
        assert!((c.lat - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_weighted_by_area() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![
            vec![square(0.0, 0.0, 1.0)],
            vec![square(10.0, 0.0, 3.0)],
        ]));
        let c = centroid(&geometry).unwrap();
        // (0.5 * 1 + 11.5 * 9) / 10
        assert!((c.lon - 10.4).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_with_mixed_winding_stays_inside() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![
            vec![square(0.0, 0.0, 2.0)],
            vec![clockwise_square(10.0, 0.0, 3.0)],
        ]));
        let c = centroid(&geometry).unwrap();

        assert!((0.0..=13.0).contains(&c.lon));
        assert!((0.0..=3.0).contains(&c.lat));
        // (1 * 4 + 11.5 * 9) / 13 and (1 * 4 + 1.5 * 9) / 13
        assert!((c.lon - 107.5 / 13.0).abs() < 1e-9);
        assert!((c.lat - 17.5 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_geometries() {
        let point = Geometry::new(Value::Point(vec![-90.0, 40.0]));
        assert_eq!(centroid(&point), Some(LatLon { lat: 40.0, lon: -90.0 }));

        let line = Geometry::new(Value::LineString(vec![vec![0.0, 0.0], vec![2.0, 0.0]]));
        assert_eq!(centroid(&line), Some(LatLon { lat: 0.0, lon: 1.0 }));

        let empty = Geometry::new(Value::MultiPolygon(vec![]));
        assert_eq!(centroid(&empty), None);

        let short = Geometry::new(Value::Point(vec![-90.0]));
        assert_eq!(centroid(&short), None);
    }
}
