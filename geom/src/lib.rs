//! Coordinates for video maps. Everything is single-precision, because that's all the display
//! systems on either end keep.

#[macro_use]
extern crate anyhow;

mod gps;

pub use crate::gps::{GPSBounds, LonLat};
