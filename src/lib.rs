//! vlbi_station - pointing and geometry engine for VLBI stations
//!
//! Decides whether an antenna can physically observe a source at a given
//! time, chooses the cable-wrap sector for the pointing, computes slew times
//! between pointings, and keeps each station's committed pointing state and
//! scan history for a scheduler.

pub mod antenna;
pub mod cable_wrap;
pub mod config;
pub mod coordinates;
pub mod equipment;
pub mod geometry;
pub mod horizon;
pub mod pointing;
pub mod source;
pub mod station;
pub mod units;

pub use antenna::Antenna;
pub use cable_wrap::{AxisRange, AxisType, CableWrap, UnwrapReference};
pub use config::{ConfigError, ObservingConfig, SessionConfig};
pub use coordinates::{AzElModel, CoordinateTransform, Position, SphericalTransform};
pub use horizon::{HorizonMask, LineMask, StepMask};
pub use pointing::PointingVector;
pub use source::{Source, SourceDirection};
pub use station::{QueryTime, Station, StationError, Visibility};
