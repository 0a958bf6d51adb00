#![forbid(unsafe_code)]

//! Core: box-model snapshots, easing curves, progress tokens, and options.
//!
//! # Role in boxslide
//! `boxslide-core` holds the pure data model. Nothing in here touches a host
//! environment; the capability traits live in `boxslide-backend` and the
//! animation engine in `boxslide-runtime`.
//!
//! # Primary responsibilities
//! - **BoxModel**: the ten box-model properties as a complete snapshot, plus
//!   partial [`box_model::Destination`] maps and axis projections.
//! - **Transition**: the named easing curves.
//! - **ProgressToken**: the integer that ties an element to its animation.
//! - **SlideOptions**: caller-facing options and their sanitised form.

pub mod box_model;
pub mod easing;
pub mod logging;
pub mod options;
pub mod token;

pub use box_model::{Axis, BoxModel, BoxProperty, Destination};
pub use easing::Transition;
pub use options::{Force, ResolvedOptions, SlideOptions};
pub use token::ProgressToken;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, trace_span, warn};
