// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point3;
use orthocrop::geometry::{Stroke, StrokeFrame, StrokeLayer};
use orthocrop::{
    compute_crop, compute_frame, FrameAttributes, GridConfig, ObjectFrameSpec, RenderResolution,
    ShapeRepresentation,
};

/// A drawing with `frames` frames of 20 strokes of 50 points each
fn drawing(frames: i32) -> ShapeRepresentation {
    let frames = (0..frames)
        .map(|frame_number| StrokeFrame {
            frame_number,
            strokes: (0..20)
                .map(|s| {
                    Stroke::new(
                        (0..50)
                            .map(|p| {
                                let t = f64::from(p) / 50.0;
                                Point3::new(t * f64::from(s), 0.0, t * f64::from(frame_number))
                            })
                            .collect(),
                    )
                })
                .collect(),
        })
        .collect();
    ShapeRepresentation::Strokes(vec![StrokeLayer {
        name: "Lines".into(),
        frames,
    }])
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for frames in [1, 24, 120] {
        let shape = drawing(frames);
        group.bench_with_input(BenchmarkId::new("strokes", frames), &shape, |b, shape| {
            b.iter(|| {
                compute_frame(
                    "Drawing",
                    black_box(shape),
                    0.1,
                    &FrameAttributes::default(),
                    true,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_crop(c: &mut Criterion) {
    let grid = GridConfig::default();
    let frame = ObjectFrameSpec {
        width_blocks: 20,
        height_blocks: 10,
        margin_blocks: 2,
    };

    c.bench_function("crop", |b| {
        b.iter(|| {
            compute_crop(
                black_box(&frame),
                &Point3::new(1.0, 0.0, 1.0),
                &Point3::new(0.0, -10.0, 0.0),
                black_box(6.0),
                &grid,
                RenderResolution::new(1920, 1080),
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_extract, bench_crop);
criterion_main!(benches);
