#![forbid(unsafe_code)]

//! Slide errors.

use std::fmt;

/// Why a slide did not start.
///
/// None of these are fatal: the element is left as it was (apart from a
/// superseded animation, which stays stopped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideError {
    /// The handle does not refer to a live element.
    InvalidElement,
    /// The destination names no property.
    EmptyDestination,
    /// Every targeted property already has its destination value.
    NothingToAnimate,
    /// The element has no parent to measure a clone under.
    Detached,
    /// The host refused a tree mutation.
    Backend(String),
}

impl SlideError {
    pub(crate) fn backend(err: impl fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

impl fmt::Display for SlideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidElement => f.write_str("not a live element"),
            Self::EmptyDestination => f.write_str("destination names no property"),
            Self::NothingToAnimate => f.write_str("nothing to animate"),
            Self::Detached => f.write_str("element has no parent to measure under"),
            Self::Backend(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for SlideError {}
