//! Landmask construction: clip a world landmass dataset to the configured
//! regions and union the pieces into one (multi)polygon.

use geo::MultiPolygon;

use crate::config::Region;
use crate::error::PipelineError;
use crate::geojson::{Feature, FeatureCollection};
use crate::geometry::{clip_to_bounds, from_multi_polygon, stack_parts, to_multi_polygon, union_step};

/// Build the landmask: a FeatureCollection holding exactly one feature
/// with empty properties, whose geometry is the union of every landmass
/// piece clipped to the given regions.
///
/// Per-pair clips that yield nothing are dropped silently; only an empty
/// input or zero collected pieces overall is fatal.
pub fn build(landmass: &[Feature], regions: &[Region]) -> Result<FeatureCollection, PipelineError> {
    if landmass.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let mut pieces: Vec<MultiPolygon<f64>> = Vec::new();
    for feature in landmass {
        let Some(geometry) = feature.geometry.as_ref() else {
            continue;
        };
        let Some(multi) = to_multi_polygon(geometry) else {
            continue;
        };
        for region in regions {
            if let Some(piece) = clip_to_bounds(&multi, &region.bounds()) {
                pieces.push(piece);
            }
        }
    }

    let Some((first, rest)) = pieces.split_first() else {
        return Err(PipelineError::NoGeometry);
    };

    let mut merged = first.clone();
    for piece in rest {
        match union_step(&merged, piece) {
            Some(unioned) => merged = unioned,
            // Exact union failed for this piece: stack its polygons onto
            // the accumulator rather than dropping them.
            None => stack_parts(&mut merged, piece),
        }
    }

    let geometry = from_multi_polygon(&merged).ok_or(PipelineError::NoGeometry)?;
    Ok(FeatureCollection::new(vec![Feature::bare(geometry)]))
}
