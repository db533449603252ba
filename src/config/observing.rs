//! Session-wide observing settings shared by all stations.

use std::collections::BTreeMap;

/// Read-only observing configuration built once per session.
///
/// Holds the per-band minimum SNR that applies to every station unless the
/// station overrides it. Passed by reference wherever it is needed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ObservingConfig {
    min_snr: BTreeMap<String, f64>,
}

impl ObservingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_snr(mut self, band: impl Into<String>, snr: f64) -> Self {
        self.min_snr.insert(band.into(), snr);
        self
    }

    /// Minimum SNR for a band, if the session defines one.
    pub fn min_snr(&self, band: &str) -> Option<f64> {
        self.min_snr.get(band).copied()
    }

    pub fn bands(&self) -> impl Iterator<Item = &str> {
        self.min_snr.keys().map(String::as_str)
    }
}
