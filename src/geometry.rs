//! Session-wide inter-station geometry.
//!
//! Built once after the full station list is known and installed into every
//! station; stations look each other up by id instead of holding references.

use qtty::Meters;
use thiserror::Error;

use crate::station::Station;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Geometry tables have mismatched lengths ({distance}, {dx}, {dy}, {dz})")]
    LengthMismatch {
        distance: usize,
        dx: usize,
        dy: usize,
        dz: usize,
    },

    #[error("Station at index {index} has id {id}; ids must match their position in the station list")]
    IdMismatch { index: usize, id: usize },
}

/// Distances and coordinate differences from one station to every station
/// in the session, indexed by station id.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecalculatedGeometry {
    mjd_start: f64,
    distance: Vec<Meters>,
    dx: Vec<Meters>,
    dy: Vec<Meters>,
    dz: Vec<Meters>,
}

impl PrecalculatedGeometry {
    pub fn new(
        mjd_start: f64,
        distance: Vec<Meters>,
        dx: Vec<Meters>,
        dy: Vec<Meters>,
        dz: Vec<Meters>,
    ) -> Result<Self, GeometryError> {
        let n = distance.len();
        if dx.len() != n || dy.len() != n || dz.len() != n {
            return Err(GeometryError::LengthMismatch {
                distance: n,
                dx: dx.len(),
                dy: dy.len(),
                dz: dz.len(),
            });
        }
        Ok(Self {
            mjd_start,
            distance,
            dx,
            dy,
            dz,
        })
    }

    /// Modified Julian date of session start.
    pub const fn mjd_start(&self) -> f64 {
        self.mjd_start
    }

    pub fn len(&self) -> usize {
        self.distance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    pub fn distance(&self, other: usize) -> Option<Meters> {
        self.distance.get(other).copied()
    }

    /// `x(other) - x(self)`.
    pub fn dx(&self, other: usize) -> Option<Meters> {
        self.dx.get(other).copied()
    }

    pub fn dy(&self, other: usize) -> Option<Meters> {
        self.dy.get(other).copied()
    }

    pub fn dz(&self, other: usize) -> Option<Meters> {
        self.dz.get(other).copied()
    }
}

/// Computes pairwise geometry for all stations and installs it.
///
/// Station ids must equal their index in `stations`.
pub fn precalculate(stations: &mut [Station], mjd_start: f64) -> Result<(), GeometryError> {
    if let Some((index, sta)) = stations
        .iter()
        .enumerate()
        .find(|(i, s)| s.id() != *i)
    {
        return Err(GeometryError::IdMismatch {
            index,
            id: sta.id(),
        });
    }

    let positions: Vec<_> = stations.iter().map(|s| *s.position()).collect();
    for (sta, from) in stations.iter_mut().zip(positions.iter()) {
        let mut distance = Vec::with_capacity(positions.len());
        let mut dx = Vec::with_capacity(positions.len());
        let mut dy = Vec::with_capacity(positions.len());
        let mut dz = Vec::with_capacity(positions.len());
        for to in &positions {
            let (x, y, z) = from.delta(to);
            distance.push(from.distance(to));
            dx.push(x);
            dy.push(y);
            dz.push(z);
        }
        sta.pre_calc(PrecalculatedGeometry::new(mjd_start, distance, dx, dy, dz)?);
    }
    log::debug!(
        "installed inter-station geometry for {} stations (MJD {:.5})",
        stations.len(),
        mjd_start
    );
    Ok(())
}
