//! VLBI station: pointing feasibility, slew cost, and commit state.
//!
//! A [`Station`] answers three questions for the scheduler:
//!
//! 1. Can the antenna point at a source at a given time?
//!    ([`is_visible`](Station::is_visible))
//! 2. How long does it take to get there from where it points now?
//!    ([`slew_time`](Station::slew_time))
//! 3. What is the station's state after a scan is chosen?
//!    ([`update`](Station::update), [`push_pointing_vector`](Station::push_pointing_vector))
//!
//! Probes are side-effect free and may be issued in any order. Commits move
//! the current pointing forward and must arrive in nondecreasing time order;
//! anything else is rejected as a scheduling defect.

pub mod error;
mod history;
mod parameters;
mod summary;


pub use error::StationError;
pub use history::{Event, ScanRecord, StationHistory};
pub use parameters::{ParameterOverrides, StationParameters};
pub use summary::StationSummary;

use log::{debug, trace};
use qtty::{Meters, Seconds};

use crate::antenna::Antenna;
use crate::cable_wrap::{AxisType, CableWrap, UnwrapReference};
use crate::config::ObservingConfig;
use crate::coordinates::{AzElModel, CoordinateTransform, Position};
use crate::equipment::Equipment;
use crate::geometry::PrecalculatedGeometry;
use crate::horizon::HorizonMask;
use crate::pointing::PointingVector;
use crate::source::SourceDirection;
use crate::units::to_deg;

/// Physical description of a station, fixed for the whole session.
#[derive(Debug)]
pub struct StationDescription {
    pub antenna: Antenna,
    /// Mechanical limits without safety margins; the margins come from the
    /// station parameters.
    pub cable_wrap: CableWrap,
    pub position: Position,
    pub equipment: Equipment,
    /// `None` means only the true horizon (elevation ≥ 0) applies.
    pub mask: Option<Box<dyn HorizonMask>>,
}

/// Time at which a visibility probe is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTime {
    /// Seconds since session start.
    At(u32),
    /// The time of the station's current pointing (session start if none).
    Current,
}

/// Result of a visibility probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub visible: bool,
    /// Unwrapped pointing when the axes are within limits, otherwise the
    /// raw pointing.
    pub pointing: PointingVector,
}

/// One antenna of the network together with its session state.
#[derive(Debug)]
pub struct Station {
    name: String,
    id: usize,
    sky_coverage_id: usize,

    antenna: Antenna,
    cable_wrap: CableWrap,
    position: Position,
    equipment: Equipment,
    mask: Option<Box<dyn HorizonMask>>,

    parameters: StationParameters,
    geometry: Option<PrecalculatedGeometry>,

    current: Option<PointingVector>,
    history: StationHistory,
    n_scans: u32,
    n_baselines: u64,
}

impl Station {
    /// Builds a station and applies the parameter safety margins to its
    /// axis limits.
    ///
    /// Fails if the mount type is undefined or the margins leave no usable
    /// axis range.
    pub fn new(
        name: impl Into<String>,
        id: usize,
        description: StationDescription,
        parameters: StationParameters,
    ) -> Result<Self, StationError> {
        let name = name.into();
        let StationDescription {
            antenna,
            mut cable_wrap,
            position,
            equipment,
            mask,
        } = description;

        if cable_wrap.axis_type() == AxisType::Undefined {
            return Err(StationError::UndefinedAxisType { station: name });
        }
        Self::apply_margins(&name, &mut cable_wrap, &parameters)?;

        Ok(Self {
            name,
            id,
            sky_coverage_id: id,
            antenna,
            cable_wrap,
            position,
            equipment,
            mask,
            parameters,
            geometry: None,
            current: None,
            history: StationHistory::new(),
            n_scans: 0,
            n_baselines: 0,
        })
    }

    fn apply_margins(
        name: &str,
        cable_wrap: &mut CableWrap,
        parameters: &StationParameters,
    ) -> Result<(), StationError> {
        cable_wrap
            .set_margins(
                parameters.axis1_low_offset,
                parameters.axis1_up_offset,
                parameters.axis2_low_offset,
                parameters.axis2_up_offset,
            )
            .map_err(|source| StationError::InvalidLimits {
                station: name.to_string(),
                source,
            })
    }

    /// Applies a parameter group to this station.
    ///
    /// Margin changes are validated against the axis limits; on error the
    /// station is left unchanged.
    pub fn apply_parameters(
        &mut self,
        group: &str,
        overrides: &ParameterOverrides,
    ) -> Result<(), StationError> {
        let mut parameters = self.parameters.clone();
        parameters.apply(group, overrides);
        if overrides.touches_margins() {
            Self::apply_margins(&self.name, &mut self.cable_wrap, &parameters)?;
        }
        self.parameters = parameters;
        debug!("{}: applied parameter group '{}'", self.name, group);
        Ok(())
    }

    // --- Identity ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn id(&self) -> usize {
        self.id
    }

    pub const fn sky_coverage_id(&self) -> usize {
        self.sky_coverage_id
    }

    pub fn set_sky_coverage_id(&mut self, id: usize) {
        self.sky_coverage_id = id;
    }

    // --- Physical description ---

    pub const fn antenna(&self) -> &Antenna {
        &self.antenna
    }

    pub const fn cable_wrap(&self) -> &CableWrap {
        &self.cable_wrap
    }

    pub const fn axis_type(&self) -> AxisType {
        self.cable_wrap.axis_type()
    }

    pub const fn position(&self) -> &Position {
        &self.position
    }

    pub const fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn mask(&self) -> Option<&dyn HorizonMask> {
        self.mask.as_deref()
    }

    /// SEFD of a band; querying a band the station does not record is a
    /// defect in the caller.
    pub fn sefd(&self, band: &str) -> Result<f64, StationError> {
        self.equipment
            .sefd(band)
            .ok_or_else(|| self.unknown_band(band))
    }

    pub fn max_sefd(&self) -> Option<f64> {
        self.equipment.max_sefd()
    }

    /// Minimum SNR for a band: the station's own value first, then the
    /// session table.
    pub fn min_snr(&self, band: &str, observing: &ObservingConfig) -> Result<f64, StationError> {
        self.parameters
            .min_snr
            .get(band)
            .copied()
            .or_else(|| observing.min_snr(band))
            .ok_or_else(|| self.unknown_band(band))
    }

    fn unknown_band(&self, band: &str) -> StationError {
        StationError::UnknownBand {
            station: self.name.clone(),
            band: band.to_string(),
        }
    }

    // --- Parameters ---

    pub const fn parameters(&self) -> &StationParameters {
        &self.parameters
    }

    pub const fn available(&self) -> bool {
        self.parameters.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.parameters.available = available;
    }

    /// True until the first scan has been committed.
    pub const fn first_scan(&self) -> bool {
        self.parameters.first_scan
    }

    pub const fn max_slew_time(&self) -> Seconds {
        self.parameters.max_slew_time
    }

    pub const fn max_wait(&self) -> Seconds {
        self.parameters.max_wait
    }

    pub const fn min_scan(&self) -> Seconds {
        self.parameters.min_scan
    }

    pub const fn max_scan(&self) -> Seconds {
        self.parameters.max_scan
    }

    pub const fn wait_setup(&self) -> Seconds {
        self.parameters.wait_setup
    }

    pub const fn wait_source(&self) -> Seconds {
        self.parameters.wait_source
    }

    pub const fn wait_tape(&self) -> Seconds {
        self.parameters.wait_tape
    }

    pub const fn wait_calibration(&self) -> Seconds {
        self.parameters.wait_calibration
    }

    pub const fn wait_corsynch(&self) -> Seconds {
        self.parameters.wait_corsynch
    }

    // --- Session state ---

    pub const fn current(&self) -> Option<&PointingVector> {
        self.current.as_ref()
    }

    /// Time of the current pointing, or session start if there is none.
    pub fn current_time(&self) -> u32 {
        self.current.map_or(0, |pv| pv.time())
    }

    pub const fn n_scans(&self) -> u32 {
        self.n_scans
    }

    pub const fn n_baselines(&self) -> u64 {
        self.n_baselines
    }

    pub const fn history(&self) -> &StationHistory {
        &self.history
    }

    // --- Geometry ---

    /// Installs the precomputed distances to all other stations.
    pub fn pre_calc(&mut self, geometry: PrecalculatedGeometry) {
        self.geometry = Some(geometry);
    }

    pub const fn geometry(&self) -> Option<&PrecalculatedGeometry> {
        self.geometry.as_ref()
    }

    fn geometry_lookup(
        &self,
        other: usize,
        f: impl Fn(&PrecalculatedGeometry, usize) -> Option<Meters>,
    ) -> Result<Meters, StationError> {
        let geometry = self
            .geometry
            .as_ref()
            .ok_or_else(|| StationError::GeometryNotComputed {
                station: self.name.clone(),
            })?;
        f(geometry, other).ok_or_else(|| StationError::UnknownStation {
            station: self.name.clone(),
            other,
        })
    }

    /// Precomputed distance to the station with id `other`.
    pub fn distance(&self, other: usize) -> Result<Meters, StationError> {
        self.geometry_lookup(other, PrecalculatedGeometry::distance)
    }

    pub fn dx(&self, other: usize) -> Result<Meters, StationError> {
        self.geometry_lookup(other, PrecalculatedGeometry::dx)
    }

    pub fn dy(&self, other: usize) -> Result<Meters, StationError> {
        self.geometry_lookup(other, PrecalculatedGeometry::dy)
    }

    pub fn dz(&self, other: usize) -> Result<Meters, StationError> {
        self.geometry_lookup(other, PrecalculatedGeometry::dz)
    }

    /// Direct distance to another station, without the precomputed table.
    pub fn distance_to(&self, other: &Station) -> Meters {
        self.position.distance(&other.position)
    }

    // --- Probes ---

    /// Raw pointing towards a source: principal-range azimuth, no unwrap,
    /// no feasibility check.
    pub fn az_el(
        &self,
        source: &dyn SourceDirection,
        time: u32,
        model: AzElModel,
        transform: &dyn CoordinateTransform,
    ) -> PointingVector {
        let topo = transform.topocentric(&self.position, source, time, model);
        let (axis1, axis2) = self.axis_type().axes(&topo);
        PointingVector::with_axes(time, topo.az, topo.el, axis1, axis2)
    }

    /// Checks whether the antenna can observe a source at a given time.
    ///
    /// The pointing is unwrapped against the current azimuth (the neutral
    /// point before the first commit). Visible means: above the true
    /// horizon, axes within their usable ranges, and on or above the horizon
    /// mask. The station is not modified.
    pub fn is_visible(
        &self,
        source: &dyn SourceDirection,
        time: QueryTime,
        model: AzElModel,
        transform: &dyn CoordinateTransform,
    ) -> Visibility {
        let time = match time {
            QueryTime::At(t) => t,
            QueryTime::Current => self.current_time(),
        };
        let raw = self.az_el(source, time, model, transform);

        if raw.el().value() < 0.0 {
            trace!("{}: {} below horizon at t={}s", self.name, source.name(), time);
            return Visibility {
                visible: false,
                pointing: raw,
            };
        }

        let Some(pointing) =
            self.cable_wrap
                .unwrap(&raw, UnwrapReference::Current, self.current.as_ref())
        else {
            trace!("{}: {} outside axis limits at t={}s", self.name, source.name(), time);
            return Visibility {
                visible: false,
                pointing: raw,
            };
        };

        let visible = self.mask.as_ref().map_or(true, |m| m.visible(&pointing));
        trace!(
            "{}: {} at t={}s az {:.3} el {:.3} visible={}",
            self.name,
            source.name(),
            time,
            to_deg(pointing.az()),
            to_deg(pointing.el()),
            visible
        );
        Visibility { visible, pointing }
    }

    /// Unwraps a pointing with an explicit reference policy.
    ///
    /// Use this where the pointing is already known to be feasible; an
    /// axis-limit violation is reported as an error rather than as an
    /// infeasible outcome.
    pub fn unwrap_pointing(
        &self,
        pointing: &PointingVector,
        reference: UnwrapReference,
    ) -> Result<PointingVector, StationError> {
        self.cable_wrap
            .unwrap(pointing, reference, self.current.as_ref())
            .ok_or_else(|| self.limit_violation(pointing))
    }

    fn limit_violation(&self, pointing: &PointingVector) -> StationError {
        StationError::AxisLimitViolation {
            station: self.name.clone(),
            time: pointing.time(),
            axis1_deg: to_deg(pointing.axis1()),
            axis2_deg: to_deg(pointing.axis2()),
        }
    }

    /// Time needed to slew from the current pointing to `target`.
    ///
    /// `target` must already be unwrapped. Returns `Some(0 s)` before the
    /// first pointing is known and `None` when the slew exceeds the
    /// station's maximum slew time.
    pub fn slew_time(&self, target: &PointingVector) -> Option<Seconds> {
        let Some(current) = self.current.as_ref() else {
            return Some(Seconds::new(0.0));
        };
        let t = self.antenna.slew_time(current, target);
        (t.value() <= self.parameters.max_slew_time.value()).then_some(t)
    }

    // --- Commits ---

    fn check_order(&self, time: u32) -> Result<(), StationError> {
        match self.current {
            Some(current) if time < current.time() => Err(StationError::OutOfOrderCommit {
                station: self.name.clone(),
                time,
                current: current.time(),
            }),
            _ => Ok(()),
        }
    }

    fn check_limits(&self, pointing: &PointingVector) -> Result<(), StationError> {
        if self.cable_wrap.axes_inside(pointing) {
            Ok(())
        } else {
            Err(self.limit_violation(pointing))
        }
    }

    /// Replaces the current pointing without recording a scan.
    pub fn push_pointing_vector(&mut self, pointing: PointingVector) -> Result<(), StationError> {
        self.check_order(pointing.time())?;
        self.check_limits(&pointing)?;
        trace!("{}: pointing moved to {}", self.name, pointing);
        self.current = Some(pointing);
        Ok(())
    }

    /// Commits a scan.
    ///
    /// Increments the scan and baseline counters, appends the scan to the
    /// history, and makes `end` the current pointing. Clears the first-scan
    /// flag.
    ///
    /// # Errors
    ///
    /// - [`StationError::OutOfOrderCommit`] if the scan starts before the
    ///   current pointing or `times` are not ordered
    /// - [`StationError::AxisLimitViolation`] if `start` or `end` lies outside
    ///   the usable axis ranges
    pub fn update(
        &mut self,
        n_baselines: u64,
        start: PointingVector,
        end: PointingVector,
        times: Vec<u32>,
        source: impl Into<String>,
    ) -> Result<(), StationError> {
        self.check_order(start.time())?;
        if end.time() < start.time() || times.windows(2).any(|w| w[1] < w[0]) {
            return Err(StationError::UnsortedTimestamps {
                station: self.name.clone(),
            });
        }
        self.check_limits(&start)?;
        self.check_limits(&end)?;

        let source = source.into();
        debug!(
            "{}: scan {} on {} t=[{}, {}]s, {} baselines",
            self.name,
            self.n_scans + 1,
            source,
            start.time(),
            end.time(),
            n_baselines
        );

        self.n_scans += 1;
        self.n_baselines += n_baselines;
        self.history.record_scan(ScanRecord {
            start,
            end,
            times,
            source,
            n_baselines,
        });
        self.current = Some(end);
        self.parameters.first_scan = false;
        Ok(())
    }
}
