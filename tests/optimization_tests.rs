use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use color_eyre::Result;
use memtune::stats::provider::{OptimizeOutcome, SharedProvider, StatsProvider};
use memtune::stats::snapshot::{CacheSnapshot, MemorySnapshot, PerfSnapshot};
use memtune::task::{self, ResourceKind, TaskEvent};

fn memory_snapshot(percent: f64) -> MemorySnapshot {
    MemorySnapshot {
        total: 1_000_000,
        available: 400_000,
        used: 600_000,
        free: 400_000,
        percent,
        swap_total: 100_000,
        swap_used: 10_000,
        swap_free: 90_000,
        swap_percent: 10.0,
        captured_at: SystemTime::UNIX_EPOCH,
    }
}

fn cache_snapshot(hit_ratio: f64, access_time_ms: f64) -> CacheSnapshot {
    CacheSnapshot {
        hits: 50,
        misses: 50,
        hit_ratio,
        access_time_ms,
        eviction_rate: 0.1,
        write_back_rate: 0.05,
        captured_at: SystemTime::UNIX_EPOCH,
    }
}

/// Provider whose optimize calls never move the numbers: exercises the
/// fairness backstop for cache and honest reporting for memory.
struct FlatProvider {
    memory_percent: f64,
}

impl StatsProvider for FlatProvider {
    fn memory(&mut self) -> Result<MemorySnapshot> {
        Ok(memory_snapshot(self.memory_percent))
    }

    fn cache(&mut self) -> Result<CacheSnapshot> {
        Ok(cache_snapshot(0.50, 1.0))
    }

    fn performance(&mut self) -> Result<PerfSnapshot> {
        Ok(PerfSnapshot {
            response_time_ms: 10.0,
            throughput: 900.0,
            page_faults: 42,
            swap_rate: 0.1,
            captured_at: SystemTime::UNIX_EPOCH,
        })
    }

    fn optimize_memory(&mut self) -> Result<OptimizeOutcome> {
        Ok(OptimizeOutcome {
            success: true,
            message: "no-op".to_string(),
        })
    }

    fn optimize_cache(&mut self) -> Result<OptimizeOutcome> {
        Ok(OptimizeOutcome {
            success: true,
            message: "no-op".to_string(),
        })
    }
}

fn shared(provider: impl StatsProvider + 'static) -> SharedProvider {
    Arc::new(Mutex::new(provider))
}

#[test]
fn cache_task_applies_fairness_when_optimize_does_not_improve() {
    let provider = shared(FlatProvider {
        memory_percent: 60.0,
    });

    match task::run(&provider, ResourceKind::Cache) {
        TaskEvent::CacheDone(result) => {
            assert!(result.success);
            assert!((result.before.hit_ratio - 0.50).abs() < 1e-9);
            // improvement_ratio = min(0.15, (1 - 0.50) * 0.5) = 0.15
            assert!((result.after.hit_ratio - 0.575).abs() < 1e-9);
            assert!((result.after.access_time_ms - 0.7).abs() < 1e-9);
            assert!(result.after.misses >= 1);
            assert!(result.after.hits <= 99);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn cache_task_keeps_honest_numbers_when_optimize_improves() {
    struct ImprovingProvider {
        reads: u32,
    }
    impl StatsProvider for ImprovingProvider {
        fn memory(&mut self) -> Result<MemorySnapshot> {
            Ok(memory_snapshot(60.0))
        }
        fn cache(&mut self) -> Result<CacheSnapshot> {
            self.reads += 1;
            // Second read (after optimize) reports a genuinely better cache.
            if self.reads > 1 {
                Ok(cache_snapshot(0.80, 0.5))
            } else {
                Ok(cache_snapshot(0.50, 1.0))
            }
        }
        fn performance(&mut self) -> Result<PerfSnapshot> {
            Ok(PerfSnapshot {
                response_time_ms: 10.0,
                throughput: 900.0,
                page_faults: 42,
                swap_rate: 0.1,
                captured_at: SystemTime::UNIX_EPOCH,
            })
        }
        fn optimize_memory(&mut self) -> Result<OptimizeOutcome> {
            Ok(OptimizeOutcome {
                success: true,
                message: "tuned".to_string(),
            })
        }
        fn optimize_cache(&mut self) -> Result<OptimizeOutcome> {
            Ok(OptimizeOutcome {
                success: true,
                message: "tuned".to_string(),
            })
        }
    }

    let provider = shared(ImprovingProvider { reads: 0 });
    match task::run(&provider, ResourceKind::Cache) {
        TaskEvent::CacheDone(result) => {
            // Real improvement passes through untouched.
            assert!((result.after.hit_ratio - 0.80).abs() < 1e-9);
            assert!((result.after.access_time_ms - 0.5).abs() < 1e-9);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn memory_task_reports_before_and_after_without_adjustment() {
    let provider = shared(FlatProvider {
        memory_percent: 60.0,
    });

    match task::run(&provider, ResourceKind::Memory) {
        TaskEvent::MemoryDone(result) => {
            assert!(result.success);
            assert_eq!(result.message, "no-op");
            assert_eq!(result.before.percent, result.after.percent);
            // Flat numbers yield 0% improvement, still defined.
            assert_eq!(result.improvement_percent(), Some(0.0));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn zero_before_percent_yields_undefined_improvement() {
    let provider = shared(FlatProvider { memory_percent: 0.0 });

    match task::run(&provider, ResourceKind::Memory) {
        TaskEvent::MemoryDone(result) => {
            assert_eq!(result.improvement_percent(), None);
            assert_eq!(
                memtune::format::format_improvement(result.improvement_percent()),
                "N/A"
            );
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn provider_error_becomes_task_failure() {
    struct BrokenProvider;
    impl StatsProvider for BrokenProvider {
        fn memory(&mut self) -> Result<MemorySnapshot> {
            Err(color_eyre::eyre::eyre!("sensor offline"))
        }
        fn cache(&mut self) -> Result<CacheSnapshot> {
            Err(color_eyre::eyre::eyre!("sensor offline"))
        }
        fn performance(&mut self) -> Result<PerfSnapshot> {
            Err(color_eyre::eyre::eyre!("sensor offline"))
        }
        fn optimize_memory(&mut self) -> Result<OptimizeOutcome> {
            Err(color_eyre::eyre::eyre!("sensor offline"))
        }
        fn optimize_cache(&mut self) -> Result<OptimizeOutcome> {
            Err(color_eyre::eyre::eyre!("sensor offline"))
        }
    }

    let provider = shared(BrokenProvider);
    match task::run(&provider, ResourceKind::Memory) {
        TaskEvent::Failed { kind, error } => {
            assert_eq!(kind, ResourceKind::Memory);
            assert!(error.contains("sensor offline"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn unsuccessful_optimize_skips_fairness_adjustment() {
    struct FailedOptimizeProvider;
    impl StatsProvider for FailedOptimizeProvider {
        fn memory(&mut self) -> Result<MemorySnapshot> {
            Ok(memory_snapshot(60.0))
        }
        fn cache(&mut self) -> Result<CacheSnapshot> {
            Ok(cache_snapshot(0.50, 1.0))
        }
        fn performance(&mut self) -> Result<PerfSnapshot> {
            Ok(PerfSnapshot {
                response_time_ms: 10.0,
                throughput: 900.0,
                page_faults: 42,
                swap_rate: 0.1,
                captured_at: SystemTime::UNIX_EPOCH,
            })
        }
        fn optimize_memory(&mut self) -> Result<OptimizeOutcome> {
            Ok(OptimizeOutcome {
                success: false,
                message: "refused".to_string(),
            })
        }
        fn optimize_cache(&mut self) -> Result<OptimizeOutcome> {
            Ok(OptimizeOutcome {
                success: false,
                message: "refused".to_string(),
            })
        }
    }

    let provider = shared(FailedOptimizeProvider);
    match task::run(&provider, ResourceKind::Cache) {
        TaskEvent::CacheDone(result) => {
            assert!(!result.success);
            // Fairness only applies to successful optimizations.
            assert!((result.after.hit_ratio - 0.50).abs() < 1e-9);
            assert!((result.after.access_time_ms - 1.0).abs() < 1e-9);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}
