use std::panic::{AssertUnwindSafe, catch_unwind};

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};

/// Axis-aligned clip window in lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

/// Clip a multipolygon to a rectangular window (Sutherland-Hodgman, ring
/// by ring). Rings that collapse below 3 vertices are dropped; a part
/// whose exterior collapses is dropped. Returns `None` when nothing
/// survives. Boundary comparisons are inclusive.
pub fn clip_to_bounds(multi: &MultiPolygon<f64>, bounds: &Bounds) -> Option<MultiPolygon<f64>> {
    let mut parts = Vec::new();

    for polygon in &multi.0 {
        let exterior = clip_ring(polygon.exterior(), bounds);
        if exterior.len() < 3 {
            continue;
        }
        let holes: Vec<LineString<f64>> = polygon
            .interiors()
            .iter()
            .map(|hole| clip_ring(hole, bounds))
            .filter(|coords| coords.len() >= 3)
            .map(LineString::new)
            .collect();
        parts.push(Polygon::new(LineString::new(exterior), holes));
    }

    if parts.is_empty() {
        None
    } else {
        Some(MultiPolygon::new(parts))
    }
}

fn clip_ring(ring: &LineString<f64>, bounds: &Bounds) -> Vec<Coord<f64>> {
    // Work on the open ring; Polygon::new re-closes the result.
    let mut output: Vec<Coord<f64>> = ring.coords().copied().collect();
    if output.len() > 1 && output.first() == output.last() {
        output.pop();
    }

    let min_x = bounds.min_x;
    let max_x = bounds.max_x;
    let min_y = bounds.min_y;
    let max_y = bounds.max_y;

    output = clip_against_edge(&output, |p| p.x >= min_x, |p1, p2| {
        let t = (min_x - p1.x) / (p2.x - p1.x);
        Coord {
            x: min_x,
            y: p1.y + t * (p2.y - p1.y),
        }
    });
    output = clip_against_edge(&output, |p| p.x <= max_x, |p1, p2| {
        let t = (max_x - p1.x) / (p2.x - p1.x);
        Coord {
            x: max_x,
            y: p1.y + t * (p2.y - p1.y),
        }
    });
    output = clip_against_edge(&output, |p| p.y >= min_y, |p1, p2| {
        let t = (min_y - p1.y) / (p2.y - p1.y);
        Coord {
            x: p1.x + t * (p2.x - p1.x),
            y: min_y,
        }
    });
    output = clip_against_edge(&output, |p| p.y <= max_y, |p1, p2| {
        let t = (max_y - p1.y) / (p2.y - p1.y);
        Coord {
            x: p1.x + t * (p2.x - p1.x),
            y: max_y,
        }
    });

    output
}

fn clip_against_edge<F, I>(ring: &[Coord<f64>], inside: F, intersect: I) -> Vec<Coord<f64>>
where
    F: Fn(&Coord<f64>) -> bool,
    I: Fn(&Coord<f64>, &Coord<f64>) -> Coord<f64>,
{
    if ring.is_empty() {
        return Vec::new();
    }

    let mut output = Vec::new();
    let n = ring.len();

    for i in 0..n {
        let current = &ring[i];
        let next = &ring[(i + 1) % n];

        match (inside(current), inside(next)) {
            (true, true) => output.push(*next),
            (true, false) => output.push(intersect(current, next)),
            (false, true) => {
                output.push(intersect(current, next));
                output.push(*next);
            }
            (false, false) => {}
        }
    }

    output
}

/// Boolean intersection of two multipolygons. A panic in the underlying
/// op or an empty result both map to `None`, so a bad part degrades to
/// "no result for this attempt" instead of aborting the run.
pub fn intersection(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> Option<MultiPolygon<f64>> {
    let result = catch_unwind(AssertUnwindSafe(|| a.intersection(b))).ok()?;
    if result.0.is_empty() { None } else { Some(result) }
}

/// One step of the landmask union fold, with the same failure contract as
/// [`intersection`].
pub fn union_step(acc: &MultiPolygon<f64>, piece: &MultiPolygon<f64>) -> Option<MultiPolygon<f64>> {
    let result = catch_unwind(AssertUnwindSafe(|| acc.union(piece))).ok()?;
    if result.0.is_empty() { None } else { Some(result) }
}

/// Last-resort merge when a union step fails: append the piece's polygons
/// onto the accumulator as extra parts. Non-topological; the result may
/// self-overlap, but no geometry is dropped.
pub fn stack_parts(acc: &mut MultiPolygon<f64>, piece: &MultiPolygon<f64>) {
    acc.0.extend(piece.0.iter().cloned());
}
