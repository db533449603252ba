//! Human-readable dump of a station's configuration and state.

use std::fmt::Display;

use super::Station;
use crate::units::to_deg;

/// Read-only diagnostic view of a [`Station`].
///
/// ```ignore
/// println!("{}", StationSummary::new(&station));
/// ```
pub struct StationSummary<'a> {
    station: &'a Station,
}

impl<'a> StationSummary<'a> {
    pub fn new(station: &'a Station) -> Self {
        Self { station }
    }
}

impl Display for StationSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sta = self.station;
        let wrap = sta.cable_wrap();
        let params = sta.parameters();

        writeln!(f, "Station {} (id {}, sky coverage {})", sta.name(), sta.id(), sta.sky_coverage_id())?;
        writeln!(
            f,
            "  position: x={:.3} m y={:.3} m z={:.3} m (lat {:.4}°, lon {:.4}°)",
            sta.position().x().value(),
            sta.position().y().value(),
            sta.position().z().value(),
            to_deg(sta.position().lat()),
            to_deg(sta.position().lon())
        )?;
        writeln!(f, "  mount: {}", wrap.axis_type())?;
        writeln!(f, "  axis 1: {} deg, usable {} deg", wrap.axis1(), wrap.axis1_usable())?;
        writeln!(f, "  axis 2: {} deg, usable {} deg", wrap.axis2(), wrap.axis2_usable())?;
        writeln!(f, "  slew: {}", sta.antenna())?;
        writeln!(f, "  SEFD: {}", sta.equipment())?;
        match sta.mask() {
            Some(mask) => writeln!(f, "  horizon mask: {}", mask.kind())?,
            None => writeln!(f, "  horizon mask: none")?,
        }
        if !params.parameter_groups.is_empty() {
            writeln!(f, "  parameter groups: {}", params.parameter_groups.join(", "))?;
        }
        writeln!(
            f,
            "  available: {}, first scan: {}, max slew: {} s",
            params.available,
            params.first_scan,
            params.max_slew_time.value()
        )?;
        writeln!(
            f,
            "  scans: {}, baselines: {}",
            sta.n_scans(),
            sta.n_baselines()
        )?;
        match sta.current() {
            Some(pv) => write!(f, "  current: {pv}"),
            None => write!(f, "  current: not pointed yet"),
        }
    }
}
