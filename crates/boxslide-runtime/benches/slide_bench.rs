#![forbid(unsafe_code)]

use boxslide_core::{BoxModel, BoxProperty, SlideOptions, Transition};
use boxslide_runtime::Slider;
use boxslide_web::{HeadlessDom, NodeId, Stylesheet};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn panels(dom: &mut HeadlessDom, n: usize) -> Vec<NodeId> {
    let root = dom.root();
    let metrics = BoxModel::NOTHING
        .with(BoxProperty::Width, 240.0)
        .with(BoxProperty::Height, 120.0)
        .with(BoxProperty::PaddingTop, 8.0)
        .with(BoxProperty::PaddingBottom, 8.0);
    (0..n)
        .map(|_| dom.spawn(root, "div", Stylesheet::block(metrics)))
        .collect()
}

fn bench_slide_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide/headless/lifecycle");
    let options = SlideOptions::new()
        .duration(250)
        .transition(Transition::EaseInOutCubic);

    group.bench_function("vslide_64_to_idle", |b| {
        b.iter(|| {
            let mut dom = HeadlessDom::new();
            let els = panels(&mut dom, 64);
            let mut slider = Slider::new();
            black_box(slider.vslide_all(&mut dom, &els, &options));
            black_box(dom.run_until_idle(&mut slider, 16.0, 64));
        });
    });

    group.bench_function("toggle_hidden_256_reverse_midway", |b| {
        b.iter(|| {
            let mut dom = HeadlessDom::new();
            let els = panels(&mut dom, 256);
            for el in &els {
                dom.set_hidden(el, true);
            }
            let mut slider = Slider::new();
            slider.hslide_all(&mut dom, &els, &options);
            dom.run_frame(&mut slider);
            dom.advance(120.0);
            dom.run_frame(&mut slider);
            black_box(slider.hslide_all(&mut dom, &els, &options));
            black_box(dom.run_until_idle(&mut slider, 16.0, 64));
        });
    });

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide/headless/tick");
    group.bench_function("tick_1024_running", |b| {
        let mut dom = HeadlessDom::new();
        let els = panels(&mut dom, 1024);
        let mut slider = Slider::new();
        let options = SlideOptions::new().duration(i64::from(u32::MAX));
        slider.vslide_all(&mut dom, &els, &options);
        b.iter(|| {
            dom.advance(16.0);
            black_box(dom.run_frame(&mut slider).len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_slide_lifecycle, bench_tick);
criterion_main!(benches);
