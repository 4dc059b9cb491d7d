use criterion::{criterion_group, criterion_main, Criterion};
use kinescore::scorer::Scorer;
use kinescore::skeleton::{Frame, Joint, Keypoint};
use std::hint::black_box;
use strum::IntoEnumIterator;

fn synthetic_track(frames: usize, phase: f64) -> Vec<Frame> {
    (0..frames)
        .map(|i| {
            let t = i as f64 * 0.1 + phase;
            Joint::iter().fold(Frame::new(), |f, j| {
                let k = j.index() as f64;
                let x = 0.5 + 0.3 * (t + k).sin();
                let y = 0.5 + 0.3 * (t * 0.7 + k).cos();
                f.with(j, Keypoint::new(x, y, 0.9))
            })
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = Scorer::default();
    let reference = synthetic_track(600, 0.0);
    let student = synthetic_track(600, 0.2);
    let short_reference = synthetic_track(150, 0.0);

    c.bench_function("score_600_frames", |b| {
        b.iter(|| scorer.score(black_box(&reference), black_box(&student), 0.0))
    });

    c.bench_function("score_looped_reference", |b| {
        b.iter(|| scorer.score(black_box(&short_reference), black_box(&student), 0.0))
    });

    c.bench_function("score_with_delay", |b| {
        b.iter(|| scorer.score(black_box(&reference), black_box(&student), black_box(2.5)))
    });
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
