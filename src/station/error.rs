use thiserror::Error;

use crate::cable_wrap::CableWrapError;

/// Errors raised by station construction and by commits or lookups that
/// break the station's invariants.
///
/// Infeasible pointings are not errors; they are reported through
/// [`Visibility`](super::Visibility) and `Option` results.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StationError {
    #[error("Station {station}: axis type is undefined")]
    UndefinedAxisType { station: String },

    #[error("Station {station}: invalid axis limits: {source}")]
    InvalidLimits {
        station: String,
        #[source]
        source: CableWrapError,
    },

    #[error("Station {station}: no SEFD or minimum SNR configured for band {band}")]
    UnknownBand { station: String, band: String },

    #[error("Station {station}: pointing at t={time}s (axis1 {axis1_deg:.3} deg, axis2 {axis2_deg:.3} deg) violates axis limits")]
    AxisLimitViolation {
        station: String,
        time: u32,
        axis1_deg: f64,
        axis2_deg: f64,
    },

    #[error("Station {station}: commit at t={time}s precedes current time t={current}s")]
    OutOfOrderCommit {
        station: String,
        time: u32,
        current: u32,
    },

    #[error("Station {station}: scan timestamps are not in chronological order")]
    UnsortedTimestamps { station: String },

    #[error("Station {station}: inter-station geometry has not been computed")]
    GeometryNotComputed { station: String },

    #[error("Station {station}: no geometry entry for station id {other}")]
    UnknownStation { station: String, other: usize },
}
