use std::time::SystemTime;

/// Point-in-time reading of system memory and swap.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySnapshot {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
    pub swap_percent: f64,
    pub captured_at: SystemTime,
}

impl MemorySnapshot {
    /// Fraction of physical memory in use, 0.0 when totals are unknown.
    pub fn pressure(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.used as f64 / self.total as f64).clamp(0.0, 1.0)
        }
    }
}

/// Point-in-time reading of cache behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    pub hits: u64,
    pub misses: u64,
    /// 0–1 range.
    pub hit_ratio: f64,
    pub access_time_ms: f64,
    pub eviction_rate: f64,
    pub write_back_rate: f64,
    pub captured_at: SystemTime,
}

/// Point-in-time performance reading.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfSnapshot {
    pub response_time_ms: f64,
    pub throughput: f64,
    pub page_faults: u64,
    pub swap_rate: f64,
    pub captured_at: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_is_zero_for_empty_totals() {
        let snap = MemorySnapshot {
            total: 0,
            available: 0,
            used: 0,
            free: 0,
            percent: 0.0,
            swap_total: 0,
            swap_used: 0,
            swap_free: 0,
            swap_percent: 0.0,
            captured_at: SystemTime::UNIX_EPOCH,
        };
        assert_eq!(snap.pressure(), 0.0);
    }

    #[test]
    fn pressure_tracks_used_fraction() {
        let snap = MemorySnapshot {
            total: 1000,
            available: 250,
            used: 750,
            free: 250,
            percent: 75.0,
            swap_total: 0,
            swap_used: 0,
            swap_free: 0,
            swap_percent: 0.0,
            captured_at: SystemTime::UNIX_EPOCH,
        };
        assert!((snap.pressure() - 0.75).abs() < 1e-9);
    }
}
