use geo::{Coord, LineString, MultiPolygon, Polygon, coord};

use crate::geojson::{Geometry, PolygonRings, Ring};

// A closed linear ring needs 3 distinct vertices plus the closing
// position (RFC 7946).
const MIN_RING_POSITIONS: usize = 4;

/// Convert stored geometry into the boolean-clipping engine's native
/// multipolygon. `Polygon` becomes a single-part multipolygon; any other
/// geometry type, or one with no usable rings, yields `None`.
pub fn to_multi_polygon(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon { coordinates } => {
            let polygon = polygon_from_rings(coordinates)?;
            Some(MultiPolygon::new(vec![polygon]))
        }
        Geometry::MultiPolygon { coordinates } => {
            let polygons: Vec<Polygon<f64>> =
                coordinates.iter().filter_map(polygon_from_rings).collect();
            if polygons.is_empty() {
                None
            } else {
                Some(MultiPolygon::new(polygons))
            }
        }
        Geometry::Unsupported => None,
    }
}

/// Build one polygon from a GeoJSON ring set. A degenerate exterior drops
/// the whole polygon; degenerate holes are dropped individually.
pub fn polygon_from_rings(rings: &PolygonRings) -> Option<Polygon<f64>> {
    let mut iter = rings.iter();
    let exterior = ring_to_line_string(iter.next()?)?;
    let holes = iter.filter_map(|ring| ring_to_line_string(ring)).collect();
    Some(Polygon::new(exterior, holes))
}

fn ring_to_line_string(ring: &Ring) -> Option<LineString<f64>> {
    if ring.len() < MIN_RING_POSITIONS {
        return None;
    }
    let coords: Vec<Coord<f64>> = ring.iter().map(|&[x, y]| coord! { x: x, y: y }).collect();
    Some(LineString::new(coords))
}

/// Convert a clip result back to stored geometry: one surviving part
/// becomes a `Polygon`, several become a `MultiPolygon`, none is `None`.
pub fn from_multi_polygon(multi: &MultiPolygon<f64>) -> Option<Geometry> {
    let mut parts: Vec<PolygonRings> = multi.0.iter().filter_map(rings_from_polygon).collect();
    match parts.len() {
        0 => None,
        1 => parts.pop().map(|coordinates| Geometry::Polygon { coordinates }),
        _ => Some(Geometry::MultiPolygon { coordinates: parts }),
    }
}

fn rings_from_polygon(polygon: &Polygon<f64>) -> Option<PolygonRings> {
    let exterior = line_string_to_ring(polygon.exterior())?;
    let mut rings = vec![exterior];
    rings.extend(polygon.interiors().iter().filter_map(line_string_to_ring));
    Some(rings)
}

fn line_string_to_ring(line: &LineString<f64>) -> Option<Ring> {
    if line.0.len() < MIN_RING_POSITIONS {
        return None;
    }
    Some(line.coords().map(|c| [c.x, c.y]).collect())
}
