use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::SystemTime;

use memtune::stats::history::{HistoryBuffer, MetricHistory};
use memtune::stats::snapshot::{CacheSnapshot, MemorySnapshot, PerfSnapshot};
use memtune::task::apply_cache_fairness;

fn memory_snapshot(i: u64) -> MemorySnapshot {
    let used = (i % 100) * 10_000;
    MemorySnapshot {
        total: 1_000_000,
        available: 1_000_000 - used,
        used,
        free: 1_000_000 - used,
        percent: (i % 100) as f64,
        swap_total: 100_000,
        swap_used: i % 100_000,
        swap_free: 100_000 - (i % 100_000),
        swap_percent: (i % 100) as f64,
        captured_at: SystemTime::UNIX_EPOCH,
    }
}

fn cache_snapshot(i: u64) -> CacheSnapshot {
    CacheSnapshot {
        hits: i % 100,
        misses: 100 - (i % 100),
        hit_ratio: (i % 100) as f64 / 100.0,
        access_time_ms: 0.5 + (i % 10) as f64 / 10.0,
        eviction_rate: 0.1,
        write_back_rate: 0.05,
        captured_at: SystemTime::UNIX_EPOCH,
    }
}

fn perf_snapshot(i: u64) -> PerfSnapshot {
    PerfSnapshot {
        response_time_ms: (i % 50) as f64,
        throughput: 1000.0 - (i % 100) as f64,
        page_faults: i % 1000,
        swap_rate: 0.1,
        captured_at: SystemTime::UNIX_EPOCH,
    }
}

fn bench_history_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_push_1k_10k_100k");

    for size in [1_000u64, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut buf = HistoryBuffer::default();
                for i in 0..size {
                    buf.push(black_box(memory_snapshot(i)));
                }
                black_box(buf.latest().map(|s| s.percent));
            })
        });
    }

    group.finish();
}

fn bench_metric_history_record(c: &mut Criterion) {
    c.bench_function("metric_history_record_10k", |b| {
        b.iter(|| {
            let mut history = MetricHistory::default();
            for i in 0..10_000u64 {
                history.record(
                    black_box(memory_snapshot(i)),
                    black_box(cache_snapshot(i)),
                    black_box(perf_snapshot(i)),
                );
            }
            black_box(history.memory.len());
        })
    });
}

fn bench_cache_fairness(c: &mut Criterion) {
    c.bench_function("cache_fairness_adjustment", |b| {
        b.iter(|| {
            let before = black_box(cache_snapshot(50));
            let mut after = before.clone();
            apply_cache_fairness(&before, &mut after);
            black_box(after.hit_ratio);
        })
    });
}

criterion_group!(
    benches,
    bench_history_push,
    bench_metric_history_record,
    bench_cache_fairness
);
criterion_main!(benches);
