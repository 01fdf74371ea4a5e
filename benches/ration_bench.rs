// ABOUTME: Criterion benchmarks for the ration calculation pipeline
// ABOUTME: Measures norm lookup, full computations and output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Criterion benchmarks for the ration calculation pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use feed_ration::engine::resolve_norm;
use feed_ration::formatters::{format_output, OutputFormat};
use feed_ration::{compute_ration, CategoryKey, RationConfig, RationRequest, ReferenceData};

/// Requests covering every category with one feed per class
fn sample_requests() -> Vec<RationRequest> {
    vec![
        RationRequest::new(CategoryKey::LactatingCow, 550.0)
            .with_milk(25.0)
            .with_feeds(["Alfalfa hay", "Corn silage, wet, with grain", "Corn grain", "Soybean meal"]),
        RationRequest::new(CategoryKey::DryCow, 600.0).with_feeds(["Wheat straw", "Barley grain"]),
        RationRequest::new(CategoryKey::MatureBull, 800.0)
            .with_feeds(["Corn stover", "Barley grain", "Cottonseed meal"]),
        RationRequest::new(CategoryKey::Calf, 120.0)
            .with_feeds(["Alfalfa hay", "Corn grain", "Soybean meal"])
            .with_override("Soybean meal", 0.5),
    ]
}

fn bench_norm_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_lookup");
    let reference = ReferenceData::builtin();
    let config = RationConfig::default();

    for category in CategoryKey::ALL {
        let policy = reference.policy(category);
        group.bench_with_input(
            BenchmarkId::from_parameter(category),
            &category,
            |b, _| {
                b.iter(|| resolve_norm(policy, black_box(437.0), black_box(18.0), &config));
            },
        );
    }

    group.finish();
}

fn bench_compute_ration(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_ration");
    let requests = sample_requests();

    for request in &requests {
        group.bench_with_input(
            BenchmarkId::from_parameter(request.category),
            request,
            |b, request| {
                b.iter(|| compute_ration(black_box(request)));
            },
        );
    }

    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("batch_all_categories", |b| {
        b.iter(|| {
            for request in &requests {
                black_box(compute_ration(request));
            }
        });
    });

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    let result = compute_ration(&sample_requests()[0]);

    group.bench_function("json", |b| {
        b.iter(|| format_output(black_box(&result), OutputFormat::Json));
    });
    group.bench_function("text", |b| {
        b.iter(|| format_output(black_box(&result), OutputFormat::Text));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_norm_lookup,
    bench_compute_ration,
    bench_formatting
);
criterion_main!(benches);
