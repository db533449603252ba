use thiserror::Error;

/// Errors raised while building axis limits for a mount.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CableWrapError {
    #[error("Unknown axis type: {0}")]
    UnknownAxisType(String),

    #[error("Axis {axis} range is inverted: [{lo_deg:.3}, {hi_deg:.3}] deg")]
    InvertedRange { axis: u8, lo_deg: f64, hi_deg: f64 },

    #[error("Axis {axis} safety margin must be finite and non-negative, got {margin_deg:.3} deg")]
    InvalidMargin { axis: u8, margin_deg: f64 },

    #[error("Axis {axis} safety margins leave no usable range")]
    MarginsExceedRange { axis: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_axis_type_display() {
        let e = CableWrapError::UnknownAxisType("ZZZZ".to_string());
        assert_eq!(e.to_string(), "Unknown axis type: ZZZZ");
    }

    #[test]
    fn inverted_range_display() {
        let e = CableWrapError::InvertedRange {
            axis: 1,
            lo_deg: 270.0,
            hi_deg: -270.0,
        };
        assert_eq!(
            e.to_string(),
            "Axis 1 range is inverted: [270.000, -270.000] deg"
        );
    }
}
