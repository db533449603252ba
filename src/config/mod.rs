//! Session configuration: station descriptions, parameter groups and the
//! shared observing settings.
//!
//! The raw structures mirror the configuration file and carry plain degrees
//! and seconds. [`SessionConfig::build_stations`] validates them, converts to
//! typed quantities and returns stations ready for scheduling, with the
//! inter-station geometry installed.
//!
//! ```toml
//! mjd_start = 58849.0
//!
//! [observing.min_snr]
//! X = 20.0
//!
//! [groups.slow]
//! max_slew_time = 300.0
//!
//! [[stations]]
//! name = "WETTZELL"
//! axis_type = "AZEL"
//! axis1_limits_deg = [-270.0, 270.0]
//! axis2_limits_deg = [5.0, 88.0]
//! slew_rate_deg_per_s = [3.0, 1.5]
//! settling_s = [10.0, 10.0]
//! position_m = [4075539.514, 931735.635, 4801629.356]
//! sefd = { X = 750.0, S = 1115.0 }
//! groups = ["slow"]
//! ```

mod error;
mod observing;

pub use error::ConfigError;
pub use observing::ObservingConfig;

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use qtty::Seconds;

use crate::antenna::{Antenna, AntennaError};
use crate::cable_wrap::{AxisRange, AxisType, CableWrap};
use crate::coordinates::{Position, SphericalTransform};
use crate::equipment::Equipment;
use crate::geometry::precalculate;
use crate::horizon::{HorizonMask, LineMask, StepMask};
use crate::station::{ParameterOverrides, Station, StationDescription, StationParameters};
use crate::units::deg;

/// Whole-session configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SessionConfig {
    /// Session start as a modified Julian date (UTC).
    pub mjd_start: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub observing: ObservingConfig,
    /// Named parameter groups that stations opt into.
    #[cfg_attr(feature = "serde", serde(default))]
    pub groups: BTreeMap<String, ParameterOverrides>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stations: Vec<StationConfig>,
}

/// One station as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct StationConfig {
    pub name: String,
    /// Must match the station's position in the list when given.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<usize>,
    pub axis_type: String,
    pub axis1_limits_deg: [f64; 2],
    pub axis2_limits_deg: [f64; 2],
    pub slew_rate_deg_per_s: [f64; 2],
    #[cfg_attr(feature = "serde", serde(default))]
    pub settling_s: [f64; 2],
    /// Geocentric x, y, z.
    pub position_m: [f64; 3],
    /// SEFD in Jy per band.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sefd: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub horizon: Option<HorizonConfig>,
    /// Parameter groups, applied in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub groups: Vec<String>,
    /// Station-specific overrides, applied after the groups.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: ParameterOverrides,
}

/// Horizon mask breakpoints in degrees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum HorizonConfig {
    /// Linear interpolation between `(azimuth, elevation)` pairs.
    Line {
        azimuths_deg: Vec<f64>,
        elevations_deg: Vec<f64>,
    },
    /// Constant elevation between consecutive azimuths; one elevation fewer
    /// than azimuths.
    Step {
        azimuths_deg: Vec<f64>,
        elevations_deg: Vec<f64>,
    },
}

impl HorizonConfig {
    fn build(&self) -> Result<Box<dyn HorizonMask>, crate::horizon::MaskError> {
        let to_rad = |values: &[f64]| values.iter().map(|&v| deg(v)).collect::<Vec<_>>();
        Ok(match self {
            HorizonConfig::Line {
                azimuths_deg,
                elevations_deg,
            } => Box::new(LineMask::new(to_rad(azimuths_deg), to_rad(elevations_deg))?),
            HorizonConfig::Step {
                azimuths_deg,
                elevations_deg,
            } => Box::new(StepMask::new(to_rad(azimuths_deg), to_rad(elevations_deg))?),
        })
    }
}

impl SessionConfig {
    /// Parses a TOML session file.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a TOML session file from disk.
    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Sidereal-time transform for this session's start date.
    pub fn transform(&self) -> SphericalTransform {
        SphericalTransform::new(self.mjd_start)
    }

    /// Builds every station and installs the pairwise geometry.
    ///
    /// Stops at the first invalid station; the error names the station and
    /// the offending field.
    pub fn build_stations(&self) -> Result<Vec<Station>, ConfigError> {
        let mut names = BTreeSet::new();
        let mut stations = Vec::with_capacity(self.stations.len());
        for (index, cfg) in self.stations.iter().enumerate() {
            if !names.insert(cfg.name.as_str()) {
                warn!("station name '{}' appears more than once", cfg.name);
            }
            stations.push(self.build_station(index, cfg)?);
        }
        precalculate(&mut stations, self.mjd_start)?;
        debug!("built {} stations", stations.len());
        Ok(stations)
    }

    fn build_station(&self, index: usize, cfg: &StationConfig) -> Result<Station, ConfigError> {
        let name = cfg.name.as_str();
        if let Some(id) = cfg.id.filter(|&id| id != index) {
            return Err(ConfigError::field(
                name,
                "id",
                format!("id {id} does not match list position {index}"),
            ));
        }

        let axis_type: AxisType = cfg
            .axis_type
            .parse()
            .map_err(|e| ConfigError::field(name, "axis_type", e))?;
        let [lo1, hi1] = cfg.axis1_limits_deg;
        let axis1 = AxisRange::new(1, deg(lo1), deg(hi1))
            .map_err(|e| ConfigError::field(name, "axis1_limits_deg", e))?;
        let [lo2, hi2] = cfg.axis2_limits_deg;
        let axis2 = AxisRange::new(2, deg(lo2), deg(hi2))
            .map_err(|e| ConfigError::field(name, "axis2_limits_deg", e))?;

        let [rate1, rate2] = cfg.slew_rate_deg_per_s;
        let [con1, con2] = cfg.settling_s;
        let antenna = Antenna::new(rate1, Seconds::new(con1), rate2, Seconds::new(con2)).map_err(
            |e| match e {
                AntennaError::NonPositiveRate { .. } => {
                    ConfigError::field(name, "slew_rate_deg_per_s", e)
                }
                AntennaError::NegativeSettling { .. } => ConfigError::field(name, "settling_s", e),
            },
        )?;

        if let Some((band, sefd)) = cfg
            .sefd
            .iter()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(ConfigError::field(
                name,
                "sefd",
                format!("band {band} has non-positive SEFD {sefd}"),
            ));
        }
        let equipment: Equipment = cfg.sefd.iter().map(|(b, &v)| (b.clone(), v)).collect();

        let mask = match &cfg.horizon {
            Some(h) => Some(h.build().map_err(|e| ConfigError::field(name, "horizon", e))?),
            None => {
                debug!("{name}: no horizon mask configured");
                None
            }
        };

        let mut parameters = StationParameters::default();
        for group in &cfg.groups {
            let overrides = self
                .groups
                .get(group)
                .ok_or_else(|| ConfigError::UnknownGroup {
                    station: name.to_string(),
                    group: group.clone(),
                })?;
            if overrides.is_empty() {
                warn!("{name}: parameter group '{group}' is empty");
            }
            parameters.apply(group, overrides);
        }
        if !cfg.parameters.is_empty() {
            parameters.apply(name, &cfg.parameters);
        }

        let [x, y, z] = cfg.position_m;
        let description = StationDescription {
            antenna,
            cable_wrap: CableWrap::new(axis_type, axis1, axis2),
            position: Position::from_f64(x, y, z),
            equipment,
            mask,
        };
        Ok(Station::new(name, index, description, parameters)?)
    }
}
