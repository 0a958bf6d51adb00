#![forbid(unsafe_code)]

//! boxslide public facade crate.
//!
//! Slide an element's box model (size, padding, margin) between collapsed
//! and natural size, one frame at a time, on any host that implements the
//! `boxslide-backend` capabilities. This crate re-exports the common types
//! from the internal crates and offers a lightweight prelude.
//!
//! ```ignore
//! use boxslide::prelude::*;
//!
//! let mut dom = HeadlessDom::new();
//! let root = dom.root();
//! let panel = dom.spawn(root, "div", Stylesheet::hidden(BoxModel::NOTHING.with(BoxProperty::Width, 80.0)));
//! let mut slider = Slider::new();
//! slider.hslide(&mut dom, &panel, &SlideOptions::new().duration(100))?;
//! dom.run_until_idle(&mut slider, 16.0, 64);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use boxslide_core::options::{DEFAULT_DISPLAY, DEFAULT_DURATION_MS, OptionsError};
pub use boxslide_core::{
    Axis, BoxModel, BoxProperty, Destination, Force, ProgressToken, ResolvedOptions, SlideOptions,
    Transition,
};

// --- Backend re-exports ----------------------------------------------------

pub use boxslide_backend::{
    AttributeStore, Dom, FrameScheduler, NodeTree, SlideHost, StyleInspector, StyleWriter,
};

// --- Runtime re-exports ----------------------------------------------------

pub use boxslide_runtime::{
    InterpolationPlan, ProgressRegistry, SlideEnd, SlideError, Slider, TickOutcome,
};

// --- Host re-exports -------------------------------------------------------

#[cfg(feature = "headless")]
pub use boxslide_web::{HeadlessDom, HeadlessError, NodeId, Stylesheet};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for boxslide callers.
#[derive(Debug)]
pub enum Error {
    /// A slide could not be started.
    Slide(SlideError),
    /// Options could not be loaded.
    Options(OptionsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slide(err) => write!(f, "{err}"),
            Self::Options(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Slide(err) => Some(err),
            Self::Options(err) => Some(err),
        }
    }
}

impl From<SlideError> for Error {
    fn from(err: SlideError) -> Self {
        Self::Slide(err)
    }
}

impl From<OptionsError> for Error {
    fn from(err: OptionsError) -> Self {
        Self::Options(err)
    }
}

/// Standard result type for boxslide APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Axis, BoxModel, BoxProperty, Destination, Error, Force, ProgressToken, Result,
        SlideError, SlideHost, SlideOptions, Slider, TickOutcome, Transition,
    };

    #[cfg(feature = "headless")]
    pub use crate::{HeadlessDom, NodeId, Stylesheet};

    pub use crate::{backend, core, runtime};
}

pub use boxslide_backend as backend;
pub use boxslide_core as core;
pub use boxslide_runtime as runtime;
#[cfg(feature = "headless")]
pub use boxslide_web as web;
