use log::info;
use serde::Serialize;
use std::time::Instant;

use super::MemorySnapshot;
use crate::stress::AllocationPattern;

pub const DEFAULT_ALLOCATIONS: usize = 10_000;
pub const DEFAULT_SIZE_KB: usize = 1;

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub duration_ms: f64,
    pub allocations: usize,
    pub size_kb: usize,
    pub pattern: AllocationPattern,
    pub retained_buffers: usize,
    pub live_before_mb: f64,
    pub live_after_mb: f64,
    pub live_objects_delta: i64,
    pub throughput_mb_per_sec: f64,
}

/// Single-threaded allocation benchmark: allocate `allocations` buffers of
/// `size_kb` KiB, fill each one byte by byte, keep some per `pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationBenchmark {
    pub allocations: usize,
    pub size_kb: usize,
    pub pattern: AllocationPattern,
}

impl AllocationBenchmark {
    /// Non-positive sizes fall back to the defaults, a missing pattern to short-lived.
    pub fn new(allocations: i64, size_kb: i64, pattern: Option<AllocationPattern>) -> Self {
        Self {
            allocations: positive_or(allocations, DEFAULT_ALLOCATIONS),
            size_kb: positive_or(size_kb, DEFAULT_SIZE_KB),
            pattern: pattern.unwrap_or_default(),
        }
    }

    pub fn run(&self) -> BenchmarkReport {
        let before = MemorySnapshot::capture();
        let start = Instant::now();

        let size_bytes = self.size_kb * 1024;
        let mut retained: Vec<Vec<u8>> = Vec::new();

        for i in 0..self.allocations {
            let mut data = vec![0u8; size_bytes];
            for (j, byte) in data.iter_mut().enumerate() {
                *byte = (i + j) as u8;
            }

            let keep = match self.pattern {
                AllocationPattern::ShortLived => false,
                AllocationPattern::LongLived => true,
                AllocationPattern::Mixed => i % 2 == 0,
            };
            if keep {
                retained.push(data);
            }
        }

        let duration = start.elapsed();
        let after = MemorySnapshot::capture();
        let delta = before.delta(&after);

        let total_mb = (self.allocations * self.size_kb) as f64 / 1024.0;
        let secs = duration.as_secs_f64();
        let report = BenchmarkReport {
            duration_ms: secs * 1000.0,
            allocations: self.allocations,
            size_kb: self.size_kb,
            pattern: self.pattern,
            retained_buffers: retained.len(),
            live_before_mb: before.live_mb(),
            live_after_mb: after.live_mb(),
            live_objects_delta: delta.allocations as i64 - delta.deallocations as i64,
            throughput_mb_per_sec: if secs > 0.0 { total_mb / secs } else { 0.0 },
        };
        info!(
            "BENCHMARK - {:?} {}x{}KiB in {:.2}ms",
            report.pattern, report.allocations, report.size_kb, report.duration_ms
        );
        report
    }
}

fn positive_or(value: i64, default: usize) -> usize {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{AllocationBenchmark, DEFAULT_ALLOCATIONS, DEFAULT_SIZE_KB};
    use crate::stress::AllocationPattern;

    fn bench(pattern: AllocationPattern) -> super::BenchmarkReport {
        AllocationBenchmark::new(6, 2, Some(pattern)).run()
    }

    #[test]
    fn non_positive_inputs_use_defaults() {
        let b = AllocationBenchmark::new(0, -5, None);
        assert_eq!(b.allocations, DEFAULT_ALLOCATIONS);
        assert_eq!(b.size_kb, DEFAULT_SIZE_KB);
        assert_eq!(b.pattern, AllocationPattern::ShortLived);

        let b = AllocationBenchmark::new(3, 4, Some(AllocationPattern::Mixed));
        assert_eq!((b.allocations, b.size_kb), (3, 4));
    }

    #[test]
    fn short_lived_retains_nothing() {
        let r = bench(AllocationPattern::ShortLived);
        assert_eq!(r.retained_buffers, 0);
        assert_eq!(r.allocations, 6);
        assert_eq!(r.size_kb, 2);
    }

    #[test]
    fn long_lived_retains_every_buffer() {
        assert_eq!(bench(AllocationPattern::LongLived).retained_buffers, 6);
    }

    #[test]
    fn mixed_retains_even_iterations() {
        assert_eq!(bench(AllocationPattern::Mixed).retained_buffers, 3);
    }

    #[test]
    fn reports_non_negative_timings() {
        let r = bench(AllocationPattern::LongLived);
        assert!(r.duration_ms >= 0.0);
        assert!(r.throughput_mb_per_sec >= 0.0);
        assert!(r.live_before_mb >= 0.0);
    }
}
