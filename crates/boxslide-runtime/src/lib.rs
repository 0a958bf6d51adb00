#![forbid(unsafe_code)]

//! Runtime: the slide scheduler and interpolation engine.
//!
//! # Role in boxslide
//! `boxslide-runtime` turns "toggle this element" into a sequence of frame
//! ticks. It is generic over the host through the `boxslide-backend` traits,
//! so the same engine drives the browser DOM and the headless test DOM.
//!
//! # Primary responsibilities
//! - **ProgressRegistry**: one entry per running slide, keyed by token.
//! - **snapshot**: zero, current, and natural box-model measurements.
//! - **toggle**: choosing the next target, reversing in-flight slides.
//! - **InterpolationPlan**: the properties a slide actually moves.
//! - **Slider**: starting, superseding, ticking, and finishing slides.
//!
//! # How it fits in the system
//! The host requests nothing on its own: [`Slider::slide`] asks the host for
//! a frame through `FrameScheduler`, and the host answers by calling
//! [`Slider::tick`] on its next frame. Every tick either asks for another
//! frame or settles the element.

pub mod error;
pub mod plan;
pub mod registry;
pub mod slider;
pub mod snapshot;
pub mod toggle;

#[cfg(test)]
mod testing;

pub use error::SlideError;
pub use plan::{InterpolationPlan, SlideEnd, Track};
pub use registry::{AnimationState, ProgressEntry, ProgressRegistry};
pub use slider::{Slider, TickOutcome};
