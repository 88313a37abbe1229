use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tabdash::{
    core::{msg::gradient::GradientMsg, state::gradient::GradientState},
    domain::color::{GradientPair, HexColor},
};

fn column_colors(pair: GradientPair, width: u16) -> Vec<HexColor> {
    (0..width)
        .map(|x| pair.at(f64::from(x) / f64::from(width.max(2) - 1)))
        .collect()
}

fn benchmark(c: &mut Criterion) {
    let from = GradientPair::default();
    let to = from.swapped();

    c.bench_function("hex-mix", |b| {
        b.iter(|| HexColor::mix(black_box(from.start()), black_box(to.start()), 0.37))
    });

    c.bench_function("pair-mix-200-columns", |b| {
        b.iter(|| column_colors(black_box(from.mix(to, 0.5)), 200))
    });

    c.bench_function("full-transition", |b| {
        b.iter(|| {
            let mut state = GradientState::new(from, 2000, 50);
            state.update(GradientMsg::Cycle);
            for _ in 0..40 {
                state.update(GradientMsg::AnimationFrame);
            }
            black_box(state.displayed())
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
