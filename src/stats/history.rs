use std::collections::VecDeque;

use super::snapshot::{CacheSnapshot, MemorySnapshot, PerfSnapshot};

/// One minute of readings at the 1 s poll cadence.
pub const HISTORY_CAPACITY: usize = 60;

/// Bounded FIFO store of snapshots, oldest-first.
///
/// `push` never fails: at capacity the single oldest entry is evicted before
/// the new one is appended. There is no other removal path.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Default for HistoryBuffer<T> {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

/// One ring per metric family, filled together on each poll tick.
#[derive(Debug, Default)]
pub struct MetricHistory {
    pub memory: HistoryBuffer<MemorySnapshot>,
    pub cache: HistoryBuffer<CacheSnapshot>,
    pub performance: HistoryBuffer<PerfSnapshot>,
}

impl MetricHistory {
    pub fn record(&mut self, memory: MemorySnapshot, cache: CacheSnapshot, perf: PerfSnapshot) {
        self.memory.push(memory);
        self.cache.push(cache);
        self.performance.push(perf);
    }
}
