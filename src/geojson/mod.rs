mod io;
mod types;

pub use io::{read_collection, write_collection};
pub use types::{Feature, FeatureCollection, FeatureId, Geometry, PolygonRings, Position, Ring};
