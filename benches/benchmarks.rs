//! Performance benchmarks for cellframe.
//!
//! This module contains benchmarks for:
//! - Resource resolution against static trees of varying size
//! - Plugin registry construction and activation scripts
//! - Widget rendering for growing tables
//!
//! Run with: `cargo bench`

use std::path::Path;

use cellframe::display::{DataTable, Frame, JsValue, PivotTable, Widget};
use cellframe::plugin::{builtin_specs, resolve, AssetLayout, PluginManager, ResourceKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

mod fixtures {
    use super::*;

    /// Main scripts and styles of the built-in plugins.
    const BUILTIN_FILES: &[&str] = &[
        "datatables/js/jquery.dataTables.min.js",
        "datatables/css/jquery.dataTables.min.css",
        "d3/js/d3.min.js",
        "c3/js/c3.min.js",
        "c3/css/c3.min.css",
        "pivot/js/pivot.min.js",
        "pivot/js/c3_renderers.min.js",
        "pivot/js/d3_renderers.min.js",
        "pivot/css/pivot.min.css",
        "selectize/js/selectize.min.js",
        "selectize/css/selectize.default.css",
    ];

    fn touch(root: &Path, file: &str) {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, file).unwrap();
    }

    /// Static tree holding the built-in plugins.
    pub fn builtin_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in BUILTIN_FILES {
            touch(dir.path(), file);
        }
        dir
    }

    /// Static tree with `count` scripts for plugin `bulk`, spread over
    /// nested directories.
    pub fn bulk_tree(count: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for i in 0..count {
            touch(dir.path(), &format!("bulk/js/group{}/script{i}.js", i % 10));
        }
        dir
    }

    /// Table of `rows` rows with mixed value types.
    pub fn frame(rows: usize) -> Frame {
        let columns = vec!["region".to_string(), "product".to_string(), "units".to_string(), "price".to_string()];
        let rows: Vec<Vec<Value>> = (0..rows)
            .map(|i| vec![json!(format!("region-{}", i % 7)), json!(format!("product-{}", i % 13)), json!(i), json!(i as f64 * 0.25)])
            .collect();
        Frame::new(columns, rows).unwrap()
    }
}

// ============================================================================
// Resolution Benchmarks
// ============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for size in [10, 100, 1000] {
        let tree = fixtures::bulk_tree(size);
        let layout = AssetLayout::new(tree.path());

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("discover", size), &layout, |b, layout| {
            b.iter(|| black_box(resolve(layout, "bulk", ResourceKind::Js, &[]).unwrap()));
        });

        let declared: Vec<String> = (0..size).map(|i| format!("group{}/script{i}.js", i % 10)).collect();
        group.bench_with_input(BenchmarkId::new("declared", size), &declared, |b, declared| {
            b.iter(|| black_box(resolve(&layout, "bulk", ResourceKind::Js, black_box(declared)).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    let tree = fixtures::builtin_tree();
    let layout = AssetLayout::new(tree.path());
    let specs = builtin_specs();

    group.bench_function("from_builtin_specs", |b| {
        b.iter(|| black_box(PluginManager::from_specs(&layout, black_box(&specs)).unwrap()));
    });

    let manager = PluginManager::from_specs(&layout, &specs).unwrap();
    group.bench_function("enable_all", |b| {
        b.iter(|| black_box(manager.enable()));
    });

    group.bench_function("with_dependencies", |b| {
        b.iter(|| black_box(manager.with_dependencies(black_box(&["pivot", "datatables"])).unwrap().len()));
    });

    group.finish();
}

// ============================================================================
// Widget Benchmarks
// ============================================================================

fn bench_widgets(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget");

    let tree = fixtures::builtin_tree();
    let layout = AssetLayout::new(tree.path());
    let manager = PluginManager::from_specs(&layout, &builtin_specs()).unwrap();

    for rows in [10, 1000, 10_000] {
        let frame = fixtures::frame(rows);
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("data_table", rows), &frame, |b, frame| {
            b.iter(|| black_box(Widget::new(&DataTable, &manager, frame, None, None).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("pivot_table", rows), &frame, |b, frame| {
            b.iter(|| {
                let mut options = JsValue::object();
                options.insert("renderers", JsValue::raw("$.pivotUtilities.c3_renderers"));
                black_box(Widget::new(&PivotTable, &manager, frame, None, Some(options)).unwrap())
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark Groups
// ============================================================================

criterion_group!(resolve_benches, bench_resolve,);

criterion_group!(registry_benches, bench_registry,);

criterion_group!(widget_benches, bench_widgets,);

criterion_main!(resolve_benches, registry_benches, widget_benches,);
