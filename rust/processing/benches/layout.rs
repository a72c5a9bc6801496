// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmark of the layout pass over synthetic designs.
//!
//! Run with: cargo bench -p archplan-processing --bench layout

use archplan_core::{normalize, DesignDocument};
use archplan_geometry::MeshKernel;
use archplan_processing::{classify_rooms, run_layout, LayoutOptions, PackingConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

const ROOM_NAMES: &[&str] = &[
    "Trauma Bay",
    "Surgery Suite",
    "Patient Room",
    "Reception",
    "Diagnostic Lab",
    "Wellness Garden",
    "Dining Hall",
    "Garage",
    "Corridor",
];

/// Generate a design with `count` rooms of varied size.
fn synthetic_design(count: usize) -> Value {
    let rooms: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "name": format!("{} {}", ROOM_NAMES[i % ROOM_NAMES.len()], i),
                "width": 2.0 + (i % 13) as f64,
                "depth": 2.0 + (i % 9) as f64,
                "height": 2.8 + (i % 4) as f64 * 0.4,
            })
        })
        .collect();
    json!({"project": {"name": "Benchmark Hospital"}, "rooms": rooms})
}

fn normalized(count: usize) -> DesignDocument {
    normalize(&synthetic_design(count)).expect("synthetic design is an object")
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for count in [10, 100, 1000] {
        let input = synthetic_design(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| normalize(black_box(input)))
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let doc = normalized(100);
    c.bench_function("classify_100_rooms", |b| {
        b.iter(|| classify_rooms(black_box(&doc.rooms), 1.8))
    });
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let options = LayoutOptions::default();
    let config = PackingConfig::default();

    for (label, kernel) in [("with_meshes", MeshKernel::new(true)), ("without_meshes", MeshKernel::new(false))] {
        let doc = normalized(100);
        group.bench_with_input(BenchmarkId::new(label, 100), &doc, |b, doc| {
            b.iter(|| run_layout(black_box(doc), &options, &config, &kernel))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_classify, bench_layout);
criterion_main!(benches);
