mod clip;
mod convert;

pub use clip::{Bounds, clip_to_bounds, intersection, stack_parts, union_step};
pub use convert::{from_multi_polygon, polygon_from_rings, to_multi_polygon};
