use thiserror::Error;

/// Errors raised while building a horizon mask from breakpoints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaskError {
    #[error("Horizon mask needs at least {required} azimuth breakpoints, got {got}")]
    TooFewPoints { required: usize, got: usize },

    #[error("Horizon mask has {azimuths} azimuths but {elevations} elevations (expected {expected})")]
    LengthMismatch {
        azimuths: usize,
        elevations: usize,
        expected: usize,
    },

    #[error("Horizon mask azimuths must be strictly increasing (breakpoint {index})")]
    NotIncreasing { index: usize },

    #[error("Horizon mask value at breakpoint {index} is not finite")]
    NonFinite { index: usize },

    #[error("Horizon mask spans only {span_deg:.3} deg of azimuth; it must cover the full circle")]
    IncompleteCoverage { span_deg: f64 },
}
