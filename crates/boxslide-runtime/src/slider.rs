#![forbid(unsafe_code)]

//! The slide driver.
//!
//! [`Slider`] owns the progress registry and exposes the public operations:
//! [`slide`](Slider::slide) for an explicit destination,
//! [`hslide`](Slider::hslide) / [`vslide`](Slider::vslide) for axis toggles,
//! and [`tick`](Slider::tick), which the host calls once per requested frame.
//!
//! # Lifecycle
//!
//! ```text
//! slide() ──► Running ──tick()──► Running ── … ──► Completed (entry removed)
//!                │
//!                └── slide() on the same element ──► Cancelled (entry removed)
//! ```
//!
//! # Invariants
//!
//! 1. At most one live entry per element: starting a slide supersedes the
//!    element's previous one before anything else happens.
//! 2. A tick for a missing or cancelled entry writes nothing and requests no
//!    frame.
//! 3. Progress is `min(elapsed / duration, 1)`; the slide finishes on the
//!    first tick whose eased scale reaches 1.
//! 4. A failed `slide` requests no frame.

use boxslide_backend::{AttributeStore, SlideHost, StyleWriter};
use boxslide_core::{Axis, Destination, ProgressToken, SlideOptions};

use crate::error::SlideError;
use crate::plan::{InterpolationPlan, SlideEnd};
use crate::registry::{ProgressEntry, ProgressRegistry};
use crate::{snapshot, toggle};

/// Result of one [`Slider::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The token no longer names a running slide; nothing was touched.
    Stale,
    /// Values written, another frame requested.
    Running { progress: f64, scale: f64 },
    /// Final values written and the element settled.
    Completed(SlideEnd),
}

/// Slide scheduler and interpolation driver for elements of type `E`.
#[derive(Debug)]
pub struct Slider<E> {
    registry: ProgressRegistry<E>,
}

impl<E: Clone + std::fmt::Debug> Slider<E> {
    /// Create a slider whose tokens come from the default seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ProgressRegistry::new(),
        }
    }

    /// Create a slider with an explicit token seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            registry: ProgressRegistry::with_seed(seed),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ProgressRegistry<E> {
        &self.registry
    }

    /// Number of slides currently registered.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    /// Whether `el` carries the token of a running slide.
    pub fn is_animating<H>(&self, host: &H, el: &E) -> bool
    where
        H: AttributeStore<Element = E>,
    {
        host.progress_token(el)
            .is_some_and(|t| self.registry.live(t).is_some())
    }

    /// Horizontal toggle: width and left/right padding and margin.
    pub fn hslide<H>(
        &mut self,
        host: &mut H,
        el: &E,
        options: &SlideOptions,
    ) -> Result<ProgressToken, SlideError>
    where
        H: SlideHost<Element = E>,
    {
        self.axis_slide(host, el, Axis::Horizontal, options)
    }

    /// Vertical toggle: height and top/bottom padding and margin.
    pub fn vslide<H>(
        &mut self,
        host: &mut H,
        el: &E,
        options: &SlideOptions,
    ) -> Result<ProgressToken, SlideError>
    where
        H: SlideHost<Element = E>,
    {
        self.axis_slide(host, el, Axis::Vertical, options)
    }

    /// [`hslide`](Self::hslide) each element in order. One element failing
    /// does not stop the rest.
    pub fn hslide_all<'a, H, I>(
        &mut self,
        host: &mut H,
        elements: I,
        options: &SlideOptions,
    ) -> Vec<Result<ProgressToken, SlideError>>
    where
        H: SlideHost<Element = E>,
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        elements
            .into_iter()
            .map(|el| self.hslide(host, el, options))
            .collect()
    }

    /// [`vslide`](Self::vslide) each element in order. One element failing
    /// does not stop the rest.
    pub fn vslide_all<'a, H, I>(
        &mut self,
        host: &mut H,
        elements: I,
        options: &SlideOptions,
    ) -> Vec<Result<ProgressToken, SlideError>>
    where
        H: SlideHost<Element = E>,
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        elements
            .into_iter()
            .map(|el| self.vslide(host, el, options))
            .collect()
    }

    fn axis_slide<H>(
        &mut self,
        host: &mut H,
        el: &E,
        axis: Axis,
        options: &SlideOptions,
    ) -> Result<ProgressToken, SlideError>
    where
        H: SlideHost<Element = E>,
    {
        let mut options = options.clone();
        let next = toggle::toggle_next(host, &self.registry, el, &mut options)?;
        self.slide(host, el, &next.restrict(axis), &options)
    }

    /// Start sliding `el` toward `destination`.
    ///
    /// Any slide already running on `el` is cancelled first. Returns the new
    /// slide's token; the first frame has been requested from the host.
    pub fn slide<H>(
        &mut self,
        host: &mut H,
        el: &E,
        destination: &Destination,
        options: &SlideOptions,
    ) -> Result<ProgressToken, SlideError>
    where
        H: SlideHost<Element = E>,
    {
        if !host.is_element(el) {
            return Err(SlideError::InvalidElement);
        }
        if destination.is_empty() {
            return Err(SlideError::EmptyDestination);
        }
        let options = options.resolve();

        if let Some(old) = host.progress_token(el) {
            self.supersede(old);
        }

        let from = snapshot::current(host, el).ok_or(SlideError::InvalidElement)?;
        let plan = InterpolationPlan::build(&from, destination);
        if plan.is_empty() {
            host.remove_attr(el, ProgressToken::ATTRIBUTE);
            tracing::debug!(target: "boxslide.slide", element = ?el, "nothing to animate");
            return Err(SlideError::NothingToAnimate);
        }

        if !snapshot::is_painted(host, el) {
            host.set_hidden(el, false);
            host.set_display(el, &options.display);
        }
        host.set_inline(el, "overflow", "hidden");

        let entry = ProgressEntry::new(el.clone(), plan, options);
        tracing::debug!(
            target: "boxslide.slide",
            element = ?el,
            end = ?entry.end,
            tracks = entry.plan.len(),
            duration_ms = entry.options.duration_ms,
            transition = %entry.options.transition,
            "slide started"
        );
        let token = self.registry.create(entry);
        host.set_attr(el, ProgressToken::ATTRIBUTE, &token.to_string());
        host.request_frame(token);
        Ok(token)
    }

    /// Cancel and drop the slide behind `token`. `Cancelled` only lives
    /// between these two calls, so its pending tick finds no entry.
    fn supersede(&mut self, token: ProgressToken) {
        if self.registry.mark_cancelled(token) {
            self.registry.remove(token);
            tracing::debug!(target: "boxslide.slide", token = token.get(), "slide superseded");
        }
    }

    /// Advance the slide named by `token` to `timestamp_ms`.
    ///
    /// The first tick of a slide fixes its start time, so it always writes
    /// the starting values.
    pub fn tick<H>(&mut self, host: &mut H, token: ProgressToken, timestamp_ms: f64) -> TickOutcome
    where
        H: SlideHost<Element = E>,
    {
        let Some(entry) = self.registry.get_mut(token) else {
            tracing::trace!(target: "boxslide.tick", token = token.get(), "stale tick");
            return TickOutcome::Stale;
        };

        let started_at = *entry.started_at.get_or_insert(timestamp_ms);
        let elapsed = timestamp_ms - started_at;
        let progress = (elapsed / f64::from(entry.options.duration_ms)).min(1.0);
        let scale = entry.options.transition.apply(progress);

        for track in entry.plan.tracks() {
            host.set_inline_px(&entry.element, track.property, track.sample(scale));
        }

        tracing::trace!(
            target: "boxslide.tick",
            token = token.get(),
            elapsed,
            progress,
            scale,
            "tick"
        );

        if scale < 1.0 {
            host.request_frame(token);
            return TickOutcome::Running { progress, scale };
        }

        let Some(entry) = self.registry.remove(token) else {
            return TickOutcome::Stale;
        };
        finish(host, &entry);
        tracing::debug!(
            target: "boxslide.slide",
            element = ?entry.element,
            end = ?entry.end,
            "slide completed"
        );
        TickOutcome::Completed(entry.end)
    }
}

impl<E: Clone + std::fmt::Debug> Default for Slider<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Settle the element into its terminal state and drop its token.
fn finish<H>(host: &mut H, entry: &ProgressEntry<H::Element>)
where
    H: StyleWriter + AttributeStore,
{
    let el = &entry.element;
    match entry.end {
        SlideEnd::Show => {
            host.clear_inline(el);
            host.set_display(el, &entry.options.display);
        }
        SlideEnd::Hide => {
            host.set_hidden(el, true);
            host.clear_inline(el);
        }
    }
    host.remove_attr(el, ProgressToken::ATTRIBUTE);
}
