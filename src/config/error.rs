use thiserror::Error;

use crate::geometry::GeometryError;
use crate::station::StationError;

/// Errors raised while loading a session configuration.
///
/// Any of these aborts the session setup; a station with a broken
/// description is never built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Station {station}: invalid field '{field}': {reason}")]
    Field {
        station: String,
        field: &'static str,
        reason: String,
    },

    #[error("Station {station}: unknown parameter group '{group}'")]
    UnknownGroup { station: String, group: String },

    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ConfigError {
    pub(crate) fn field(station: &str, field: &'static str, reason: impl ToString) -> Self {
        Self::Field {
            station: station.to_string(),
            field,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_station_and_field() {
        let err = ConfigError::field("WETTZELL", "axis_type", "unknown axis type 'ALTAZ'");
        assert_eq!(
            err.to_string(),
            "Station WETTZELL: invalid field 'axis_type': unknown axis type 'ALTAZ'"
        );
    }

    #[test]
    fn station_errors_pass_through() {
        let err: ConfigError = StationError::UndefinedAxisType {
            station: "X".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Station X: axis type is undefined");
    }
}
