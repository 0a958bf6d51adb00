#![no_main]

use boxslide_core::box_model::parse_px;
use boxslide_core::{ProgressToken, SlideOptions, Transition};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let px = parse_px(s);
    assert!(px.is_finite(), "parse_px returned {px} for {s:?}");

    if let Some(token) = ProgressToken::parse_attr(s) {
        assert!(token.get() > 0);
        assert_eq!(ProgressToken::parse_attr(&token.to_string()), Some(token));
    }

    if let Ok(transition) = s.parse::<Transition>() {
        assert_eq!(transition.name().parse::<Transition>().ok(), Some(transition));
    }

    let resolved = SlideOptions::new()
        .display(s)
        .transition_name(s)
        .resolve();
    assert!(resolved.duration_ms > 0);
    assert!(!resolved.display.is_empty());
    assert_ne!(resolved.display, "none");
});
