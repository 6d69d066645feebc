//! Table formatter micro-benchmarks
//!
//! Measures the full pipeline (grid construction through composition) for
//! square tables of growing size, with and without rules and spans.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mathtab::{
    AreaFactory, BoundingBox, DeviceConfig, ElementIdGenerator, FormattingContext, GraphicDevice,
    LayoutConfig, LineStyle, Scaled, StandardDevice, TableCell, TableFormatter, TableSpec, ValueList,
    layout_document,
};
use serde_json::json;
use std::hint::black_box;

fn square_table(device: &StandardDevice, size: usize, ruled: bool) -> TableSpec {
    let factory: &dyn AreaFactory = device.factory();
    let mut ids = ElementIdGenerator::new();
    let mut spec = TableSpec::new(size, size);
    if ruled {
        spec = spec
            .with_frame(LineStyle::Solid)
            .with_row_lines(ValueList::single(LineStyle::Solid))
            .with_column_lines(ValueList::single(LineStyle::Dashed));
    }
    for i in 0..size {
        for j in 0..size {
            let id = ids.next_id();
            let width = Scaled::from_int(5 + ((i * 7 + j * 3) % 20) as i32);
            let bbox = BoundingBox::new(width, Scaled::from_int(8), Scaled::from_int(3));
            spec.set_cell(i, j, TableCell::new(id, factory.content(id, bbox)));
        }
    }
    spec
}

fn benchmark_table_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_layout");
    let device = StandardDevice::new(DeviceConfig::default());
    let ctx = FormattingContext::new(Scaled::from_int(16));

    for size in [2, 8, 32] {
        for ruled in [false, true] {
            let spec = square_table(&device, size, ruled);
            let name = if ruled { "ruled" } else { "plain" };
            group.bench_with_input(BenchmarkId::new(name, size), &spec, |b, spec| {
                let mut formatter = TableFormatter::new(LayoutConfig::default());
                b.iter(|| {
                    formatter
                        .layout(&ctx, &device, black_box(spec))
                        .expect("Failed to lay out table")
                });
            });
        }
    }

    group.finish();
}

fn benchmark_document(c: &mut Criterion) {
    let rows: Vec<_> = (0..10)
        .map(|i| {
            json!({
                "cells": (0..10)
                    .map(|j| json!({ "width": 5 + (i + j) % 7, "height": 8, "depth": 3 }))
                    .collect::<Vec<_>>(),
                "label": { "width": 12, "height": 8, "depth": 3 }
            })
        })
        .collect();
    let document = json!({
        "rows": rows,
        "rowlines": "solid",
        "columnlines": "solid none",
        "frame": "solid",
        "align": "axis"
    })
    .to_string();

    c.bench_function("layout_document_10x10", |b| {
        b.iter(|| layout_document(black_box(&document), LayoutConfig::default()).expect("Failed to lay out document"))
    });
}

criterion_group!(benches, benchmark_table_sizes, benchmark_document);
criterion_main!(benches);
