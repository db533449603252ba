//! Radio source direction abstraction.

use std::fmt::Debug;

use qtty::Radians;

/// Anything that can report a fixed celestial direction.
///
/// Catalog handling lives outside this crate; the pointing engine only needs
/// a name for the event trail and the equatorial coordinates for the
/// coordinate transform.
///
/// # Example
///
/// ```ignore
/// use vlbi_station::source::{Source, SourceDirection};
/// use vlbi_station::units::deg;
///
/// let src = Source::new("0552+398", deg(88.878), deg(39.814));
/// assert_eq!(src.name(), "0552+398");
/// ```
pub trait SourceDirection: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Right ascension.
    fn ra(&self) -> Radians;

    /// Declination.
    fn dec(&self) -> Radians;
}

/// A catalog source with a fixed J2000 direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    name: String,
    ra: Radians,
    dec: Radians,
}

impl Source {
    pub fn new(name: impl Into<String>, ra: Radians, dec: Radians) -> Self {
        Self {
            name: name.into(),
            ra,
            dec,
        }
    }
}

impl SourceDirection for Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn ra(&self) -> Radians {
        self.ra
    }

    fn dec(&self) -> Radians {
        self.dec
    }
}
