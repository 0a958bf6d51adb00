#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use boxslide_backend::AttributeStore;
use boxslide_core::{BoxModel, BoxProperty, SlideOptions};
use boxslide_runtime::{SlideEnd, Slider, TickOutcome};
use boxslide_web::{HeadlessDom, Stylesheet};
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
fn headless_slide_runs_on_wasm() {
    let mut dom = HeadlessDom::new();
    let root = dom.root();
    let el = dom.spawn(
        root,
        "div",
        Stylesheet::block(BoxModel::NOTHING.with(BoxProperty::Height, 40.0)),
    );
    dom.set_hidden(&el, true);

    let mut slider = Slider::new();
    let token = slider
        .vslide(&mut dom, &el, &SlideOptions::new().duration(100))
        .unwrap();
    dom.run_frame_at(&mut slider, 0.0);
    dom.run_frame_at(&mut slider, 50.0);
    assert_eq!(dom.inline_px(el, BoxProperty::Height), Some(20.0));

    let out = dom.run_frame_at(&mut slider, 100.0);
    assert_eq!(out, vec![(token, TickOutcome::Completed(SlideEnd::Show))]);
    assert!(!dom.is_hidden(&el));
}
