// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect};
use understory_lens::{
    ClipId, ContentSource, CoordinateSource, FrameClock, HostError, Lens, LensConfig, LensFrame,
    OverlaySink, magnification_transform,
};

/// Host whose snapshot is a flat list of points standing in for scene content.
struct BenchHost {
    transform: Option<Affine>,
    content_len: usize,
    last: Option<LensFrame>,
}

impl CoordinateSource for BenchHost {
    fn device_to_scene(&self) -> Result<Option<Affine>, HostError> {
        Ok(self.transform)
    }

    fn screen_bounds(&self) -> Result<Rect, HostError> {
        Ok(Rect::new(0.0, 0.0, 1_920.0, 1_080.0))
    }
}

impl ContentSource for BenchHost {
    type Snapshot = Vec<Point>;

    fn capture(&mut self) -> Result<Vec<Point>, HostError> {
        Ok((0..self.content_len)
            .map(|i| Point::new(i as f64, (i * 7 % 1_080) as f64))
            .collect())
    }
}

impl FrameClock for BenchHost {
    fn request_frame(&mut self) {}
}

impl OverlaySink for BenchHost {
    fn mount(&mut self, _clip_id: ClipId) {}

    fn present(&mut self, frame: &LensFrame, snapshot: &Vec<Point>) {
        black_box(snapshot.len());
        self.last = Some(*frame);
    }

    fn hide(&mut self) {}

    fn unmount(&mut self, _clip_id: ClipId) {}
}

fn active_lens(transform: Option<Affine>, content_len: usize) -> (Lens<Vec<Point>>, BenchHost) {
    let mut host = BenchHost {
        transform,
        content_len,
        last: None,
    };
    let mut lens = Lens::new(LensConfig::default(), &mut host);
    lens.activate(&mut host);
    (lens, host)
}

fn bench_lens(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_lens");
    group.sample_size(50);

    group.bench_function("magnification_transform", |b| {
        b.iter(|| {
            black_box(magnification_transform(
                black_box(Point::new(512.0, 384.0)),
                black_box(2.5),
                black_box(120.0),
            ))
        });
    });

    for &(label, transform) in &[
        ("transform", Some(Affine::scale(0.75))),
        ("bounds_fallback", None),
    ] {
        group.bench_function(format!("pointer_burst_then_frame({label})"), |b| {
            let (mut lens, mut host) = active_lens(transform, 10_000);
            let mut x = 0.0_f64;
            b.iter(|| {
                for _ in 0..16 {
                    x = (x + 3.0) % 1_920.0;
                    lens.note_pointer_position(Point::new(x, 540.0), &mut host);
                }
                black_box(lens.on_frame(&mut host))
            });
        });
    }

    for &content_len in &[1_000_usize, 100_000] {
        group.bench_function(format!("activate_with_capture(n={content_len})"), |b| {
            b.iter_batched(
                || active_lens(Some(Affine::IDENTITY), content_len),
                |(mut lens, mut host)| {
                    lens.deactivate(&mut host);
                    lens.activate(&mut host);
                    black_box(host.last);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lens);
criterion_main!(benches);
