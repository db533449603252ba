//! Receiver sensitivity per observing band.

use std::collections::BTreeMap;
use std::fmt::Display;

/// System equivalent flux density (Jy) for each band the station records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Equipment {
    sefd: BTreeMap<String, f64>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the SEFD of a band.
    pub fn with_band(mut self, band: impl Into<String>, sefd: f64) -> Self {
        self.sefd.insert(band.into(), sefd);
        self
    }

    /// SEFD for a band, if the station records it.
    pub fn sefd(&self, band: &str) -> Option<f64> {
        self.sefd.get(band).copied()
    }

    /// Largest SEFD across all bands, or `None` for an empty table.
    pub fn max_sefd(&self) -> Option<f64> {
        self.sefd.values().copied().reduce(f64::max)
    }

    pub fn bands(&self) -> impl Iterator<Item = &str> {
        self.sefd.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sefd.is_empty()
    }
}

impl FromIterator<(String, f64)> for Equipment {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            sefd: iter.into_iter().collect(),
        }
    }
}

impl Display for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (band, sefd) in &self.sefd {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{band}: {sefd:.0} Jy")?;
            first = false;
        }
        Ok(())
    }
}
