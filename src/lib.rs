//! hexmask - Derive a simplified US landmask and clip hex grids against it
//!
//! Two batch stages connected only through the landmask file artifact:
//! [`landmask::build`] clips a world landmass dataset to four regional
//! bounding boxes and unions the pieces; [`hexclip::clip`] intersects a
//! hexagonal grid with that landmask, keeping only hexes that touch land.

pub mod config;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod hexclip;
pub mod landmask;
