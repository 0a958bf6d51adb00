#![forbid(unsafe_code)]

//! Box-model snapshots of live elements.
//!
//! - [`nothing`]: all zeroes.
//! - [`current`]: what the element measures right now (zeroes if it is not
//!   painted).
//! - [`something`]: what the element would measure if it were shown, found by
//!   measuring a throwaway clone next to it.

use boxslide_backend::{AttributeStore, NodeTree, StyleInspector, StyleWriter};
use boxslide_core::{BoxModel, BoxProperty};

use crate::error::SlideError;

/// The zeroed snapshot.
#[inline]
#[must_use]
pub const fn nothing() -> BoxModel {
    BoxModel::NOTHING
}

/// Whether `el` occupies layout space: a live element, not `hidden`, and not
/// computed `display: none`.
///
/// Zero-sized elements still count as painted.
pub fn is_painted<H>(host: &H, el: &H::Element) -> bool
where
    H: StyleInspector + AttributeStore,
{
    host.is_element(el)
        && !host.is_hidden(el)
        && host.computed_display(el).as_deref() != Some("none")
}

/// Live measurement of `el`, or `None` if it is not an element.
pub fn current<H>(host: &H, el: &H::Element) -> Option<BoxModel>
where
    H: StyleInspector + AttributeStore,
{
    if !host.is_element(el) {
        return None;
    }
    if !is_painted(host, el) {
        return Some(nothing());
    }
    Some(BoxModel::from_fn(|prop| host.computed_px(el, prop)))
}

/// Natural size of `el`, measured on a visible, transparent deep clone
/// appended to the same parent and removed again before returning.
pub fn something<H>(host: &mut H, el: &H::Element) -> Result<BoxModel, SlideError>
where
    H: StyleInspector + StyleWriter + AttributeStore + NodeTree,
{
    if !host.is_element(el) {
        return Err(SlideError::InvalidElement);
    }
    let parent = host.parent(el).ok_or(SlideError::Detached)?;

    let probe = host.clone_deep(el).map_err(SlideError::backend)?;
    host.set_hidden(&probe, false);
    host.clear_inline(&probe);
    host.set_display(&probe, "block");
    host.set_inline(&probe, "visibility", "visible");
    host.set_inline(&probe, "opacity", "0");

    host.append_child(&parent, &probe).map_err(SlideError::backend)?;
    let measured = current(host, &probe);
    host.remove_child(&parent, &probe).map_err(SlideError::backend)?;

    tracing::trace!(
        target: "boxslide.slide",
        probe = ?probe,
        width = ?measured.map(|m| m.get(BoxProperty::Width)),
        height = ?measured.map(|m| m.get(BoxProperty::Height)),
        "measured detached clone"
    );

    measured.ok_or(SlideError::InvalidElement)
}
