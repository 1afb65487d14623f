use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

use super::{ALLOCATOR, AllocCounters};

const MB: f64 = 1024.0 * 1024.0;

fn to_mb(bytes: u64) -> f64 {
    bytes as f64 / MB
}

/// Allocator counters sampled at one instant.
#[derive(Debug, Clone, Copy)]
pub struct MemorySnapshot {
    counters: AllocCounters,
}

impl MemorySnapshot {
    pub fn capture() -> Self {
        Self {
            counters: ALLOCATOR.counters(),
        }
    }

    /// Bytes live on the heap at capture time, in MB.
    pub fn live_mb(&self) -> f64 {
        to_mb(self.counters.live_bytes())
    }

    /// Difference between this snapshot and a later one.
    pub fn delta(&self, after: &MemorySnapshot) -> MemoryDelta {
        let (b, a) = (self.counters, after.counters);
        MemoryDelta {
            allocations: a.allocations.saturating_sub(b.allocations),
            deallocations: a.deallocations.saturating_sub(b.deallocations),
            allocated_mb: to_mb(a.allocated_bytes.saturating_sub(b.allocated_bytes)),
            live_delta_mb: (a.live_bytes() as f64 - b.live_bytes() as f64) / MB,
            live_after_mb: to_mb(a.live_bytes()),
        }
    }
}

/// Heap activity between two snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryDelta {
    pub allocations: u64,
    pub deallocations: u64,
    pub allocated_mb: f64,
    pub live_delta_mb: f64,
    pub live_after_mb: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    pub live_mb: f64,
    pub total_allocated_mb: f64,
    pub total_freed_mb: f64,
    pub allocations: u64,
    pub deallocations: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeStats {
    pub num_cpu: usize,
    pub num_physical_cpu: usize,
    pub available_parallelism: usize,
    pub memory_stats: MemoryStats,
    pub uptime_secs: f64,
    pub timestamp: DateTime<Utc>,
}

impl RuntimeStats {
    /// Sample process-wide counters; `started_at` anchors the uptime.
    pub fn collect(started_at: Instant) -> Self {
        let c = ALLOCATOR.counters();
        Self {
            num_cpu: num_cpus::get(),
            num_physical_cpu: num_cpus::get_physical(),
            available_parallelism: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            memory_stats: MemoryStats {
                live_mb: to_mb(c.live_bytes()),
                total_allocated_mb: to_mb(c.allocated_bytes),
                total_freed_mb: to_mb(c.freed_bytes),
                allocations: c.allocations,
                deallocations: c.deallocations,
            },
            uptime_secs: started_at.elapsed().as_secs_f64(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySnapshot, RuntimeStats};
    use std::time::Instant;

    #[test]
    fn delta_sees_a_large_allocation() {
        let before = MemorySnapshot::capture();
        let buf = std::hint::black_box(vec![1u8; 4 * 1024 * 1024]);
        let after = MemorySnapshot::capture();

        let delta = before.delta(&after);
        assert!(delta.allocations >= 1);
        assert!(delta.allocated_mb >= 4.0);
        drop(buf);
    }

    #[test]
    fn collect_reports_cpus_and_uptime() {
        let started = Instant::now();
        let stats = RuntimeStats::collect(started);
        assert!(stats.num_cpu >= 1);
        assert!(stats.available_parallelism >= 1);
        assert!(stats.uptime_secs >= 0.0);
        assert!(stats.memory_stats.allocations > 0);
    }
}
