//! # Startup Composition Benchmarks
//!
//! | Stage | Input |
//! |-------|-------|
//! | Resolve | four layers, growing key count |
//! | Finalize | chain-shaped graphs of growing size |
//! | Compose | the full host from in-memory files |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use host_config::{ConfigurationResolver, MemorySource, StaticHost};
use host_runtime::{Startup, StartupOptions};
use serde_json::{json, Map, Value};
use service_graph::{Capability, CompositionGraph};
use std::sync::Arc;

// ============================================================================
// Resolve
// ============================================================================

fn layer(keys: usize, value: i64) -> Value {
    let mut sections: Vec<Map<String, Value>> = vec![Map::new(); 16];
    for i in 0..keys {
        sections[i % 16].insert(format!("Key{i}"), json!(value));
    }
    let root: Map<String, Value> = sections
        .into_iter()
        .enumerate()
        .map(|(i, section)| (format!("Section{i}"), Value::Object(section)))
        .collect();
    Value::Object(root)
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for keys in [16, 256, 2048] {
        group.throughput(Throughput::Elements(keys as u64));
        group.bench_with_input(BenchmarkId::from_parameter(keys), &keys, |b, &keys| {
            b.iter(|| {
                let resolved = ConfigurationResolver::new()
                    .with_source(MemorySource::new("base", 0, layer(keys, 1)))
                    .with_source(MemorySource::absent("host", 10))
                    .with_source(MemorySource::new("environment", 20, layer(keys / 2, 2)))
                    .with_source(MemorySource::new("variables", 30, layer(keys / 4, 3)))
                    .resolve();
                black_box(resolved)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Finalize
// ============================================================================

static NAMES: [&str; 8] = ["n0", "n1", "n2", "n3", "n4", "n5", "n6", "n7"];

fn chain(length: usize) -> CompositionGraph {
    let mut graph = CompositionGraph::default();
    for (i, name) in NAMES.iter().take(length).enumerate() {
        let capability: Capability<usize> = Capability::new(*name);
        let dependencies: Vec<_> = if i == 0 {
            vec![]
        } else {
            vec![Capability::<usize>::new(NAMES[i - 1]).id()]
        };
        graph
            .add_singleton(capability, &dependencies, move |_| Ok(Arc::new(i)))
            .unwrap();
    }
    graph
}

fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize");

    for length in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &length| {
            b.iter_batched(
                || chain(length),
                |mut graph| black_box(graph.finalize()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Compose
// ============================================================================

fn bench_compose(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("appsettings.json"),
        r#"{"SavingIdeaSettings": {"ConnectionStrings": {"SavingIdeaDataContext": "Server=db"}}}"#,
    )
    .unwrap();
    let startup = Startup::new(StaticHost::new(dir.path()), StartupOptions::default());

    c.bench_function("compose/host", |b| b.iter(|| black_box(startup.compose())));
}

criterion_group!(benches, bench_resolve, bench_finalize, bench_compose);
criterion_main!(benches);
