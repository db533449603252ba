//! Operational parameters of a station.

use std::collections::BTreeMap;

use qtty::{Radians, Seconds};

use crate::units::deg;

/// Timing constants, safety margins and flags of one station.
///
/// The wait times are not used by the pointing engine itself; they are read
/// by the scan cost model outside this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct StationParameters {
    /// Parameter groups applied to this station, in application order.
    pub parameter_groups: Vec<String>,
    /// True until the first scan is committed; no setup overhead applies to it.
    pub first_scan: bool,
    /// False if the station must not take part in new scans.
    pub available: bool,

    // --- Axis safety margins ---
    pub axis1_low_offset: Radians,
    pub axis1_up_offset: Radians,
    pub axis2_low_offset: Radians,
    pub axis2_up_offset: Radians,

    /// Station-specific minimum SNR per band; the session table applies
    /// for bands not listed here.
    pub min_snr: BTreeMap<String, f64>,

    // --- Timing ---
    pub wait_setup: Seconds,
    pub wait_source: Seconds,
    pub wait_tape: Seconds,
    pub wait_calibration: Seconds,
    /// Extra scan time for correlator synchronization.
    pub wait_corsynch: Seconds,
    pub max_slew_time: Seconds,
    /// Longest idle time tolerated while waiting for slower antennas.
    pub max_wait: Seconds,
    pub max_scan: Seconds,
    pub min_scan: Seconds,
}

impl Default for StationParameters {
    fn default() -> Self {
        Self {
            parameter_groups: Vec::new(),
            first_scan: true,
            available: true,
            axis1_low_offset: deg(5.0),
            axis1_up_offset: deg(5.0),
            axis2_low_offset: deg(1.0),
            axis2_up_offset: deg(1.0),
            min_snr: BTreeMap::new(),
            wait_setup: Seconds::new(10.0),
            wait_source: Seconds::new(5.0),
            wait_tape: Seconds::new(1.0),
            wait_calibration: Seconds::new(10.0),
            wait_corsynch: Seconds::new(3.0),
            max_slew_time: Seconds::new(9999.0),
            max_wait: Seconds::new(9999.0),
            max_scan: Seconds::new(600.0),
            min_scan: Seconds::new(30.0),
        }
    }
}

/// Partial parameter set from a configuration group.
///
/// Angles are in degrees and times in seconds, as written in configuration
/// files. Only the fields that are present override the station's values.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ParameterOverrides {
    pub available: Option<bool>,
    pub first_scan: Option<bool>,
    pub axis1_low_offset: Option<f64>,
    pub axis1_up_offset: Option<f64>,
    pub axis2_low_offset: Option<f64>,
    pub axis2_up_offset: Option<f64>,
    pub min_snr: BTreeMap<String, f64>,
    pub wait_setup: Option<f64>,
    pub wait_source: Option<f64>,
    pub wait_tape: Option<f64>,
    pub wait_calibration: Option<f64>,
    pub wait_corsynch: Option<f64>,
    pub max_slew_time: Option<f64>,
    pub max_wait: Option<f64>,
    pub max_scan: Option<f64>,
    pub min_scan: Option<f64>,
}

impl ParameterOverrides {
    /// Returns true if applying these overrides would change the safety
    /// margins.
    pub fn touches_margins(&self) -> bool {
        self.axis1_low_offset.is_some()
            || self.axis1_up_offset.is_some()
            || self.axis2_low_offset.is_some()
            || self.axis2_up_offset.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl StationParameters {
    /// Applies a group's overrides and records the group name.
    pub fn apply(&mut self, group: &str, overrides: &ParameterOverrides) {
        self.parameter_groups.push(group.to_string());

        fn set_seconds(target: &mut Seconds, value: Option<f64>) {
            if let Some(v) = value {
                *target = Seconds::new(v);
            }
        }
        fn set_angle(target: &mut Radians, value: Option<f64>) {
            if let Some(v) = value {
                *target = deg(v);
            }
        }

        if let Some(v) = overrides.available {
            self.available = v;
        }
        if let Some(v) = overrides.first_scan {
            self.first_scan = v;
        }
        set_angle(&mut self.axis1_low_offset, overrides.axis1_low_offset);
        set_angle(&mut self.axis1_up_offset, overrides.axis1_up_offset);
        set_angle(&mut self.axis2_low_offset, overrides.axis2_low_offset);
        set_angle(&mut self.axis2_up_offset, overrides.axis2_up_offset);
        self.min_snr.extend(
            overrides
                .min_snr
                .iter()
                .map(|(band, snr)| (band.clone(), *snr)),
        );
        set_seconds(&mut self.wait_setup, overrides.wait_setup);
        set_seconds(&mut self.wait_source, overrides.wait_source);
        set_seconds(&mut self.wait_tape, overrides.wait_tape);
        set_seconds(&mut self.wait_calibration, overrides.wait_calibration);
        set_seconds(&mut self.wait_corsynch, overrides.wait_corsynch);
        set_seconds(&mut self.max_slew_time, overrides.max_slew_time);
        set_seconds(&mut self.max_wait, overrides.max_wait);
        set_seconds(&mut self.max_scan, overrides.max_scan);
        set_seconds(&mut self.min_scan, overrides.min_scan);
    }
}
