#![no_main]

use arbitrary::Arbitrary;
use boxslide_backend::AttributeStore;
use boxslide_core::{BoxModel, BoxProperty, Destination, Force, SlideOptions};
use boxslide_runtime::{Slider, TickOutcome};
use boxslide_web::{HeadlessDom, NodeId, Stylesheet};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Hslide { el: u8, duration: i16, force: Option<bool> },
    Vslide { el: u8, duration: i16, force: Option<bool> },
    Slide { el: u8, prop: u8, value: i16 },
    Frame { dt: u8 },
    Forget { el: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    panels: Vec<(u8, u8, bool)>,
    ops: Vec<Op>,
}

fn options(duration: i16, force: Option<bool>) -> SlideOptions {
    let options = SlideOptions::new().duration(i64::from(duration));
    match force {
        Some(true) => options.force(Force::Show),
        Some(false) => options.force(Force::Hide),
        None => options,
    }
}

fuzz_target!(|input: Input| {
    let mut dom = HeadlessDom::new();
    let root = dom.root();
    let panels: Vec<NodeId> = input
        .panels
        .iter()
        .take(8)
        .map(|&(w, h, hidden)| {
            let metrics = BoxModel::NOTHING
                .with(BoxProperty::Width, f64::from(w))
                .with(BoxProperty::Height, f64::from(h));
            let el = dom.spawn(root, "div", Stylesheet::block(metrics));
            dom.set_hidden(&el, hidden);
            el
        })
        .collect();
    if panels.is_empty() {
        return;
    }
    let pick = |i: u8| panels[usize::from(i) % panels.len()];
    let mut slider = Slider::with_seed(0);

    for op in input.ops.into_iter().take(256) {
        match op {
            Op::Hslide { el, duration, force } => {
                let _ = slider.hslide(&mut dom, &pick(el), &options(duration, force));
            }
            Op::Vslide { el, duration, force } => {
                let _ = slider.vslide(&mut dom, &pick(el), &options(duration, force));
            }
            Op::Slide { el, prop, value } => {
                let prop = BoxProperty::ALL[usize::from(prop) % BoxProperty::ALL.len()];
                let to = Destination::new().with(prop, f64::from(value));
                let _ = slider.slide(&mut dom, &pick(el), &to, &SlideOptions::new());
            }
            Op::Frame { dt } => {
                dom.advance(f64::from(dt));
                for (_, outcome) in dom.run_frame(&mut slider) {
                    if let TickOutcome::Running { progress, scale } = outcome {
                        assert!((0.0..=1.0).contains(&progress));
                        assert!(scale < 1.0);
                    }
                }
            }
            Op::Forget { el } => dom.forget(pick(el)),
        }

        // One live slide per element at most.
        assert!(slider.active_count() <= panels.len());
        for el in &panels {
            if let Some(token) = dom.progress_token(el) {
                assert!(slider.registry().contains(token));
            }
        }
    }

    // Without new work every slide settles.
    dom.run_until_idle(&mut slider, 16.0, 10_000);
    assert_eq!(slider.active_count(), 0);
    for el in &panels {
        assert!(!slider.is_animating(&dom, el));
    }
});
