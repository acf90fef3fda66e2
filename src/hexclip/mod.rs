//! Hex-grid clipping against the landmask boundary.

use geo::{Centroid, Contains, MultiPolygon};

use crate::error::PipelineError;
use crate::geojson::{Feature, FeatureCollection, Geometry};
use crate::geometry::{self, from_multi_polygon, polygon_from_rings, to_multi_polygon};

/// Running tally of hex dispositions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClipStats {
    /// Hexes replaced by their intersection with the boundary
    pub clipped: usize,
    /// Hexes kept verbatim (no intersection result but centroid inside)
    pub kept: usize,
    /// Hexes dropped (unusable geometry or entirely outside)
    pub skipped: usize,
}

impl ClipStats {
    pub fn total(&self) -> usize {
        self.clipped + self.kept + self.skipped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Clipped,
    Kept,
}

/// Called after each hex with the number processed so far and the running
/// stats. Presentation only; the pipeline ignores its effects.
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, &ClipStats);

/// Clip every hex against the first feature of the landmask collection.
///
/// Retained hexes carry the source hex's properties (absent/null
/// normalized to `{}`) and id; dropped hexes are omitted from the output,
/// which otherwise preserves input order.
pub fn clip(
    hexes: &[Feature],
    landmask: &FeatureCollection,
    mut progress: Option<ProgressFn<'_>>,
) -> Result<(Vec<Feature>, ClipStats), PipelineError> {
    let boundary = landmask
        .features
        .first()
        .ok_or(PipelineError::EmptyInput)?;
    let boundary_geometry = boundary
        .geometry
        .as_ref()
        .ok_or(PipelineError::MissingBoundary)?;
    let boundary_multi =
        to_multi_polygon(boundary_geometry).ok_or(PipelineError::BoundaryConversion)?;

    // Decompose once; each part is a separate intersection operand.
    let parts: Vec<MultiPolygon<f64>> = boundary_multi
        .0
        .iter()
        .map(|polygon| MultiPolygon::new(vec![polygon.clone()]))
        .collect();

    let mut output = Vec::new();
    let mut stats = ClipStats::default();

    for (index, hex) in hexes.iter().enumerate() {
        match clip_one(hex, &boundary_multi, &parts) {
            Some((geometry, Disposition::Clipped)) => {
                stats.clipped += 1;
                output.push(retained(hex, geometry));
            }
            Some((geometry, Disposition::Kept)) => {
                stats.kept += 1;
                output.push(retained(hex, geometry));
            }
            None => stats.skipped += 1,
        }
        if let Some(observer) = progress.as_mut() {
            observer(index + 1, &stats);
        }
    }

    Ok((output, stats))
}

fn clip_one(
    hex: &Feature,
    boundary: &MultiPolygon<f64>,
    parts: &[MultiPolygon<f64>],
) -> Option<(Geometry, Disposition)> {
    let geometry = hex.geometry.as_ref()?;
    let Geometry::Polygon { coordinates } = geometry else {
        return None;
    };
    if coordinates.is_empty() {
        return None;
    }
    let hex_polygon = polygon_from_rings(coordinates)?;
    let hex_multi = MultiPolygon::new(vec![hex_polygon]);

    let is_inside = hex_multi
        .centroid()
        .map(|point| boundary.contains(&point))
        .unwrap_or(false);

    classify(first_intersection(&hex_multi, parts), geometry, is_inside)
}

/// Intersect the hex with each boundary part in order and take the first
/// non-empty result. Later parts are discarded: a hex is not expected to
/// span more than one landmask part.
fn first_intersection(hex: &MultiPolygon<f64>, parts: &[MultiPolygon<f64>]) -> Option<Geometry> {
    parts.iter().find_map(|part| {
        let result = geometry::intersection(hex, part)?;
        from_multi_polygon(&result)
    })
}

/// The disposition policy: a successful clip wins, an inside centroid
/// rescues the original geometry, anything else is dropped.
fn classify(
    clipped: Option<Geometry>,
    original: &Geometry,
    is_inside: bool,
) -> Option<(Geometry, Disposition)> {
    match (clipped, is_inside) {
        (Some(geometry), _) => Some((geometry, Disposition::Clipped)),
        (None, true) => Some((original.clone(), Disposition::Kept)),
        (None, false) => None,
    }
}

fn retained(hex: &Feature, geometry: Geometry) -> Feature {
    Feature {
        type_: hex.type_.clone(),
        id: hex.id.clone(),
        geometry: Some(geometry),
        properties: Some(hex.properties.clone().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::{FeatureId, Ring};
    use geo::Area;
    use serde_json::{Map, json};

    fn square_ring(min: f64, max: f64) -> Ring {
        vec![
            [min, min],
            [min, max],
            [max, max],
            [max, min],
            [min, min],
        ]
    }

    fn hex_at(min: f64, max: f64) -> Feature {
        let mut properties = Map::new();
        properties.insert("factor".to_string(), json!("chel"));
        properties.insert("value".to_string(), json!(0.25));
        let mut feature = Feature::new(
            Geometry::Polygon {
                coordinates: vec![square_ring(min, max)],
            },
            properties,
        );
        feature.id = Some(FeatureId::String(format!("hex-{min}")));
        feature
    }

    fn landmask() -> FeatureCollection {
        FeatureCollection::new(vec![Feature::bare(Geometry::Polygon {
            coordinates: vec![square_ring(0.0, 10.0)],
        })])
    }

    fn area_of(geometry: &Geometry) -> f64 {
        to_multi_polygon(geometry).unwrap().unsigned_area()
    }

    #[test]
    fn test_hex_fully_inside_is_clipped_to_itself() {
        let hexes = vec![hex_at(0.0, 1.0)];
        let (output, stats) = clip(&hexes, &landmask(), None).unwrap();

        assert_eq!(stats.clipped, 1);
        assert_eq!(stats.kept, 0);
        assert_eq!(stats.skipped, 0);
        assert!((area_of(output[0].geometry.as_ref().unwrap()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hex_far_outside_is_skipped() {
        let hexes = vec![hex_at(1000.0, 1001.0)];
        let (output, stats) = clip(&hexes, &landmask(), None).unwrap();

        assert!(output.is_empty());
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_straddling_hex_is_clipped_smaller() {
        // Crosses the landmask corner at (10,10); a quarter of it is land
        let hexes = vec![hex_at(9.0, 11.0)];
        let (output, stats) = clip(&hexes, &landmask(), None).unwrap();

        assert_eq!(stats.clipped, 1);
        let clipped = output[0].geometry.as_ref().unwrap();
        assert!((area_of(clipped) - 1.0).abs() < 1e-9);
        assert_eq!(output[0].id, hexes[0].id);
        assert_eq!(output[0].properties, hexes[0].properties);
    }

    #[test]
    fn test_conservation_over_mixed_grid() {
        let mut broken = hex_at(0.0, 1.0);
        broken.geometry = None;
        let mut not_a_polygon = hex_at(0.0, 1.0);
        not_a_polygon.geometry = Some(Geometry::Unsupported);
        let hexes = vec![
            hex_at(0.0, 1.0),    // inside
            hex_at(9.0, 11.0),   // straddling
            hex_at(50.0, 51.0),  // outside
            broken,              // no geometry
            not_a_polygon,       // wrong type
        ];

        let (output, stats) = clip(&hexes, &landmask(), None).unwrap();

        assert_eq!(stats.total(), hexes.len());
        assert_eq!(output.len(), stats.clipped + stats.kept);
        assert_eq!(stats.clipped, 2);
        assert_eq!(stats.skipped, 3);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let hexes = vec![hex_at(0.0, 1.0), hex_at(50.0, 51.0), hex_at(2.0, 3.0)];
        let (output, _) = clip(&hexes, &landmask(), None).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].id, hexes[0].id);
        assert_eq!(output[1].id, hexes[2].id);
    }

    #[test]
    fn test_null_properties_normalize_to_empty_object() {
        let mut hex = hex_at(0.0, 1.0);
        hex.properties = None;
        let (output, _) = clip(&[hex], &landmask(), None).unwrap();

        assert_eq!(output[0].properties, Some(Map::new()));
    }

    #[test]
    fn test_first_intersection_wins_across_parts() {
        // Boundary has two parts and the hex overlaps both; only the
        // first part's intersection survives.
        let mask = FeatureCollection::new(vec![Feature::bare(Geometry::MultiPolygon {
            coordinates: vec![vec![square_ring(0.0, 4.0)], vec![square_ring(6.0, 10.0)]],
        })]);
        let hexes = vec![hex_at(3.0, 7.0)];

        let (output, stats) = clip(&hexes, &mask, None).unwrap();

        assert_eq!(stats.clipped, 1);
        // Overlap with each part is a 1x1 corner; only part one's survives
        let clipped = output[0].geometry.as_ref().unwrap();
        assert!((area_of(clipped) - 1.0).abs() < 1e-9);
        let Geometry::Polygon { coordinates } = clipped else {
            panic!("expected a Polygon clip result");
        };
        for &[x, y] in &coordinates[0] {
            assert!(x <= 4.0 + 1e-9 && y <= 4.0 + 1e-9);
        }
    }

    #[test]
    fn test_classify_policy_table() {
        let original = Geometry::Polygon {
            coordinates: vec![square_ring(0.0, 1.0)],
        };
        let smaller = Geometry::Polygon {
            coordinates: vec![square_ring(0.0, 0.5)],
        };

        let clipped = classify(Some(smaller.clone()), &original, false).unwrap();
        assert_eq!(clipped, (smaller.clone(), Disposition::Clipped));

        // A clip result wins even when the centroid is also inside
        let clipped = classify(Some(smaller.clone()), &original, true).unwrap();
        assert_eq!(clipped.1, Disposition::Clipped);

        let kept = classify(None, &original, true).unwrap();
        assert_eq!(kept, (original.clone(), Disposition::Kept));

        assert!(classify(None, &original, false).is_none());
    }

    #[test]
    fn test_empty_landmask_fails() {
        let mask = FeatureCollection::new(vec![]);
        assert_eq!(
            clip(&[hex_at(0.0, 1.0)], &mask, None),
            Err(PipelineError::EmptyInput)
        );
    }

    #[test]
    fn test_landmask_without_geometry_fails() {
        let mut feature = Feature::bare(Geometry::Unsupported);
        feature.geometry = None;
        let mask = FeatureCollection::new(vec![feature]);
        assert_eq!(
            clip(&[hex_at(0.0, 1.0)], &mask, None),
            Err(PipelineError::MissingBoundary)
        );
    }

    #[test]
    fn test_unconvertible_boundary_fails() {
        let mask = FeatureCollection::new(vec![Feature::bare(Geometry::Unsupported)]);
        assert_eq!(
            clip(&[hex_at(0.0, 1.0)], &mask, None),
            Err(PipelineError::BoundaryConversion)
        );
    }

    #[test]
    fn test_empty_hex_slice_is_allowed() {
        let (output, stats) = clip(&[], &landmask(), None).unwrap();
        assert!(output.is_empty());
        assert_eq!(stats, ClipStats::default());
    }

    #[test]
    fn test_progress_observer_sees_every_hex() {
        let hexes = vec![hex_at(0.0, 1.0), hex_at(50.0, 51.0)];
        let mut seen = Vec::new();
        let mut observer = |done: usize, stats: &ClipStats| seen.push((done, *stats));

        clip(&hexes, &landmask(), Some(&mut observer)).unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[1].1.total(), 2);
    }
}
