//! Station positions and the coordinate-transform seam.
//!
//! The pointing engine never performs precession or nutation itself; it asks a
//! [`CoordinateTransform`] for the topocentric direction and works from there.

mod position;
mod transform;

pub use position::Position;
pub use transform::{AzElModel, CoordinateTransform, SphericalTransform, Topocentric};
