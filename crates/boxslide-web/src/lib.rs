#![forbid(unsafe_code)]

//! Hosts for the boxslide runtime.
//!
//! # Role in boxslide
//! `boxslide-web` provides the two concrete implementations of the
//! `boxslide-backend` capability traits:
//!
//! - [`HeadlessDom`]: an in-memory DOM with a host-driven frame clock. Every
//!   frame is pumped explicitly with a timestamp, so slides are fully
//!   deterministic. Used by tests and by native embedders.
//! - `DomHost` (wasm32 only): the browser DOM through `web-sys`, with frames
//!   scheduled through `requestAnimationFrame`. The `hslide` and `vslide`
//!   functions are exported to JavaScript.

pub mod headless;

pub use headless::{HeadlessDom, HeadlessError, NodeId, Stylesheet};

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{DomHost, DomHostError};
