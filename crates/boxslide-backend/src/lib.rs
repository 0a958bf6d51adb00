#![forbid(unsafe_code)]
#![doc = "Host capability traits for boxslide: style access, attributes, node tree, and frame scheduling."]
#![doc = ""]
#![doc = "This crate defines the boundary between the boxslide runtime and the environment"]
#![doc = "that owns the elements (the browser DOM via `boxslide-web`, or the headless"]
#![doc = "in-memory DOM used by tests)."]

use core::fmt;

use boxslide_core::ProgressToken;
use boxslide_core::box_model::{BoxProperty, parse_px};

/// Attribute marking an element as hidden.
pub const HIDDEN_ATTRIBUTE: &str = "hidden";

/// Element handle and error types shared by every capability.
pub trait Dom {
    /// Opaque element handle. The runtime clones it freely and never assumes
    /// ownership of the node behind it.
    type Element: Clone + fmt::Debug;

    /// Platform-specific error type for fallible tree mutations.
    type Error: fmt::Debug + fmt::Display;

    /// Whether `el` still refers to a live element node.
    fn is_element(&self, el: &Self::Element) -> bool;
}

/// Read access to resolved (computed) styles.
pub trait StyleInspector: Dom {
    /// Computed value of a CSS property (`"padding-top"`, `"display"`).
    ///
    /// `None` when the host has no value for it.
    fn computed_style(&self, el: &Self::Element, css_name: &str) -> Option<String>;

    /// Computed pixel value of a box-model property; unreadable values are `0.0`.
    fn computed_px(&self, el: &Self::Element, prop: BoxProperty) -> f64 {
        self.computed_style(el, prop.css_name())
            .map_or(0.0, |raw| parse_px(&raw))
    }

    /// Computed `display` mode, if any.
    fn computed_display(&self, el: &Self::Element) -> Option<String> {
        self.computed_style(el, "display")
    }
}

/// Write access to inline presentation state.
pub trait StyleWriter: Dom {
    /// Set an inline style property by CSS name.
    fn set_inline(&mut self, el: &Self::Element, css_name: &str, value: &str);

    /// Drop every inline style override.
    fn clear_inline(&mut self, el: &Self::Element);

    /// Set a box-model property to `px` pixels.
    fn set_inline_px(&mut self, el: &Self::Element, prop: BoxProperty, px: f64) {
        self.set_inline(el, prop.css_name(), &format!("{px}px"));
    }

    /// Set the inline `display` mode.
    fn set_display(&mut self, el: &Self::Element, mode: &str) {
        self.set_inline(el, "display", mode);
    }
}

/// String attribute slots on elements.
pub trait AttributeStore: Dom {
    fn get_attr(&self, el: &Self::Element, name: &str) -> Option<String>;

    fn set_attr(&mut self, el: &Self::Element, name: &str, value: &str);

    fn remove_attr(&mut self, el: &Self::Element, name: &str);

    /// Whether the `hidden` attribute is present.
    fn is_hidden(&self, el: &Self::Element) -> bool {
        self.get_attr(el, HIDDEN_ATTRIBUTE).is_some()
    }

    /// Add or remove the `hidden` attribute.
    fn set_hidden(&mut self, el: &Self::Element, hidden: bool) {
        if hidden {
            self.set_attr(el, HIDDEN_ATTRIBUTE, "");
        } else {
            self.remove_attr(el, HIDDEN_ATTRIBUTE);
        }
    }

    /// Progress token stored on the element, if it parses.
    fn progress_token(&self, el: &Self::Element) -> Option<ProgressToken> {
        self.get_attr(el, ProgressToken::ATTRIBUTE)
            .and_then(|raw| ProgressToken::parse_attr(&raw))
    }
}

/// Tree mutations needed to measure a detached clone.
pub trait NodeTree: Dom {
    /// Deep copy of `el`, not yet attached anywhere.
    fn clone_deep(&mut self, el: &Self::Element) -> Result<Self::Element, Self::Error>;

    fn parent(&self, el: &Self::Element) -> Option<Self::Element>;

    fn append_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), Self::Error>;

    fn remove_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), Self::Error>;
}

/// Frame scheduling.
///
/// The host answers a request by calling the runtime's tick for `token` once,
/// on its next rendering frame, with a monotonic timestamp in milliseconds.
pub trait FrameScheduler {
    fn request_frame(&mut self, token: ProgressToken);
}

/// Everything the slide runtime needs from its host.
pub trait SlideHost: StyleInspector + StyleWriter + AttributeStore + NodeTree + FrameScheduler {}

impl<T> SlideHost for T where
    T: StyleInspector + StyleWriter + AttributeStore + NodeTree + FrameScheduler
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // -----------------------------------------------------------------------
    // Mock host for provided-method tests
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct OneElement {
        computed: HashMap<&'static str, String>,
        inline: Vec<(String, String)>,
        attrs: HashMap<String, String>,
        frames: Vec<ProgressToken>,
    }

    impl Dom for OneElement {
        type Element = ();
        type Error = String;

        fn is_element(&self, _el: &()) -> bool {
            true
        }
    }

    impl StyleInspector for OneElement {
        fn computed_style(&self, _el: &(), css_name: &str) -> Option<String> {
            self.computed.get(css_name).cloned()
        }
    }

    impl StyleWriter for OneElement {
        fn set_inline(&mut self, _el: &(), css_name: &str, value: &str) {
            self.inline.push((css_name.to_owned(), value.to_owned()));
        }

        fn clear_inline(&mut self, _el: &()) {
            self.inline.clear();
        }
    }

    impl AttributeStore for OneElement {
        fn get_attr(&self, _el: &(), name: &str) -> Option<String> {
            self.attrs.get(name).cloned()
        }

        fn set_attr(&mut self, _el: &(), name: &str, value: &str) {
            self.attrs.insert(name.to_owned(), value.to_owned());
        }

        fn remove_attr(&mut self, _el: &(), name: &str) {
            self.attrs.remove(name);
        }
    }

    impl NodeTree for OneElement {
        fn clone_deep(&mut self, _el: &()) -> Result<(), String> {
            Err("single-element host".into())
        }

        fn parent(&self, _el: &()) -> Option<()> {
            None
        }

        fn append_child(&mut self, _parent: &(), _child: &()) -> Result<(), String> {
            Err("single-element host".into())
        }

        fn remove_child(&mut self, _parent: &(), _child: &()) -> Result<(), String> {
            Err("single-element host".into())
        }
    }

    impl FrameScheduler for OneElement {
        fn request_frame(&mut self, token: ProgressToken) {
            self.frames.push(token);
        }
    }

    fn assert_slide_host<H: SlideHost>(_host: &H) {}

    #[test]
    fn mock_is_a_slide_host() {
        let mut host = OneElement::default();
        assert_slide_host(&host);
        let token = ProgressToken::new(3).unwrap();
        host.request_frame(token);
        assert_eq!(host.frames, vec![token]);
    }

    #[test]
    fn computed_px_parses_or_zeroes() {
        let mut host = OneElement::default();
        host.computed.insert("width", "80px".into());
        host.computed.insert("margin-top", "auto".into());
        assert_eq!(host.computed_px(&(), BoxProperty::Width), 80.0);
        assert_eq!(host.computed_px(&(), BoxProperty::MarginTop), 0.0);
        assert_eq!(host.computed_px(&(), BoxProperty::Height), 0.0);
    }

    #[test]
    fn inline_px_and_display_use_css_names() {
        let mut host = OneElement::default();
        host.set_inline_px(&(), BoxProperty::PaddingLeft, 12.5);
        host.set_display(&(), "flex");
        assert_eq!(
            host.inline,
            vec![
                ("padding-left".to_owned(), "12.5px".to_owned()),
                ("display".to_owned(), "flex".to_owned()),
            ]
        );
    }

    #[test]
    fn hidden_flag_round_trip() {
        let mut host = OneElement::default();
        assert!(!host.is_hidden(&()));
        host.set_hidden(&(), true);
        assert!(host.is_hidden(&()));
        host.set_hidden(&(), false);
        assert!(!host.is_hidden(&()));
    }

    #[test]
    fn progress_token_reads_attribute() {
        let mut host = OneElement::default();
        assert_eq!(host.progress_token(&()), None);
        host.set_attr(&(), ProgressToken::ATTRIBUTE, "77");
        assert_eq!(host.progress_token(&()), ProgressToken::new(77));
        host.set_attr(&(), ProgressToken::ATTRIBUTE, "garbage");
        assert_eq!(host.progress_token(&()), None);
    }
}
