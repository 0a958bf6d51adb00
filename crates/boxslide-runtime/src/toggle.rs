#![forbid(unsafe_code)]

//! Toggle resolution: where should a show/hide toggle go next?

use boxslide_backend::{AttributeStore, NodeTree, StyleInspector, StyleWriter};
use boxslide_core::{BoxModel, Force, SlideOptions};

use crate::error::SlideError;
use crate::registry::ProgressRegistry;
use crate::snapshot;

/// Plain toggle: collapse a painted element, expand anything else to its
/// natural size.
pub fn next<H>(host: &mut H, el: &H::Element) -> Result<BoxModel, SlideError>
where
    H: StyleInspector + StyleWriter + AttributeStore + NodeTree,
{
    if !host.is_element(el) {
        return Err(SlideError::InvalidElement);
    }
    if snapshot::is_painted(host, el) {
        Ok(snapshot::nothing())
    } else {
        snapshot::something(host, el)
    }
}

/// Toggle target for `el`, taking any in-flight slide into account.
///
/// While a slide is running on `el`, the toggle reverses it: the opposite of
/// that slide's end is written into `options.force`, replacing whatever the
/// caller put there. An explicit force then picks the natural or zero
/// snapshot directly; without one this falls back to [`next`].
pub fn toggle_next<H>(
    host: &mut H,
    registry: &ProgressRegistry<H::Element>,
    el: &H::Element,
    options: &mut SlideOptions,
) -> Result<BoxModel, SlideError>
where
    H: StyleInspector + StyleWriter + AttributeStore + NodeTree,
{
    if !host.is_element(el) {
        return Err(SlideError::InvalidElement);
    }

    if let Some(entry) = host.progress_token(el).and_then(|t| registry.live(t)) {
        options.force = Some(entry.end.reversed());
    }

    match options.force {
        Some(Force::Show) => snapshot::something(host, el),
        Some(Force::Hide) => Ok(snapshot::nothing()),
        None => next(host, el),
    }
}
