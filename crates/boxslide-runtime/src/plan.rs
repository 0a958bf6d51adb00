#![forbid(unsafe_code)]

//! Interpolation plans.
//!
//! A plan is the list of properties one slide actually moves. It is built
//! once, when the slide starts, by diffing the destination against the
//! element's current snapshot; properties already at their target are left
//! out, so an empty plan means there is nothing to animate.

use boxslide_core::{BoxModel, BoxProperty, Destination, Force};

/// One property's path: `from` at scale 0, `to` at scale 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub property: BoxProperty,
    pub from: f64,
    pub to: f64,
    pub delta: f64,
}

impl Track {
    /// Pixel value at an eased `scale`.
    #[inline]
    #[must_use]
    pub fn sample(&self, scale: f64) -> f64 {
        self.from + self.delta * scale
    }
}

/// What completion means for the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideEnd {
    /// The element ends up occupying space.
    Show,
    /// The element ends up hidden.
    Hide,
}

impl SlideEnd {
    /// Direction a toggle should take while this animation is in flight.
    #[must_use]
    pub const fn reversed(self) -> Force {
        match self {
            Self::Show => Force::Hide,
            Self::Hide => Force::Show,
        }
    }
}

/// Ordered tracks for one slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpolationPlan {
    tracks: Vec<Track>,
}

impl InterpolationPlan {
    /// Diff `destination` against `current`.
    ///
    /// A property gets a track when the destination gives a finite value that
    /// differs from the current one. Tracks follow [`BoxProperty::ALL`] order.
    #[must_use]
    pub fn build(current: &BoxModel, destination: &Destination) -> Self {
        let tracks = destination
            .iter()
            .filter(|(_, to)| to.is_finite())
            .filter_map(|(property, to)| {
                let from = current.get(property);
                (to != from).then_some(Track {
                    property,
                    from,
                    to,
                    delta: to - from,
                })
            })
            .collect();
        Self { tracks }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track for `property`, if the plan moves it.
    #[must_use]
    pub fn track(&self, property: BoxProperty) -> Option<&Track> {
        self.tracks.iter().find(|t| t.property == property)
    }

    /// `Show` when width or height is headed somewhere positive.
    #[must_use]
    pub fn end(&self) -> SlideEnd {
        let grows = |p| self.track(p).is_some_and(|t| t.to > 0.0);
        if grows(BoxProperty::Width) || grows(BoxProperty::Height) {
            SlideEnd::Show
        } else {
            SlideEnd::Hide
        }
    }
}
