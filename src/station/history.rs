//! Append-only record of what a station has done during the session.

use crate::pointing::PointingVector;

/// One committed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRecord {
    pub start: PointingVector,
    pub end: PointingVector,
    /// Scan timestamps in seconds since session start, as supplied by the
    /// scheduler (slew end, idle end, scan start, ...).
    pub times: Vec<u32>,
    pub source: String,
    pub n_baselines: u64,
}

/// Entry of the station's event trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: u32,
    pub label: String,
}

/// Scan history and event trail, kept in commit order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationHistory {
    scans: Vec<ScanRecord>,
    events: Vec<Event>,
}

impl StationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_scan(&mut self, record: ScanRecord) {
        self.events.push(Event {
            time: record.start.time(),
            label: record.source.clone(),
        });
        self.scans.push(record);
    }

    pub fn scans(&self) -> &[ScanRecord] {
        &self.scans
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    pub fn last_scan(&self) -> Option<&ScanRecord> {
        self.scans.last()
    }
}
