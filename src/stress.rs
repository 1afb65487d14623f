use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use crate::monitoring::{MemoryDelta, MemorySnapshot};

/// Size of every buffer the stress workers allocate.
pub const ALLOCATION_BYTES: usize = 1024 * 1024;

/// Iterations between two scheduler yields inside a stress worker.
const STRESS_YIELD_INTERVAL: usize = 10;

/// How long the stress buffers stay alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationPattern {
    /// Allocate, hash, drop.
    #[default]
    ShortLived,
    /// Keep every buffer until the run ends.
    LongLived,
    /// Even iterations kept, odd iterations hashed and dropped.
    Mixed,
}

#[derive(Debug, Clone, Serialize)]
pub struct StressReport {
    pub duration_ms: f64,
    pub workers: usize,
    pub allocations: usize,
    pub pattern: AllocationPattern,
    pub retained_buffers: usize,
    pub memory: MemoryDelta,
    pub throughput_mb_per_sec: f64,
}

/// Allocation-heavy workload used to compare against the mining runs.
#[derive(Debug, Clone, Copy)]
pub struct StressTest {
    pub allocations: usize,
    pub workers: usize,
    pub pattern: AllocationPattern,
}

impl StressTest {
    pub fn run(&self) -> StressReport {
        let start = Instant::now();
        let before = MemorySnapshot::capture();

        let retained: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for id in 0..self.workers {
                let retained = &retained;
                let (allocations, pattern) = (self.allocations, self.pattern);
                scope.spawn(move || {
                    let local = stress_worker(id, allocations, pattern);
                    if !local.is_empty() {
                        retained.lock().expect("mutex poisoned").extend(local);
                    }
                });
            }
        });

        let after = MemorySnapshot::capture();
        let duration = start.elapsed();
        let retained_buffers = retained.into_inner().expect("mutex poisoned").len();

        let total_mb = (self.allocations * self.workers * ALLOCATION_BYTES) as f64 / 1024.0 / 1024.0;
        let secs = duration.as_secs_f64();
        let report = StressReport {
            duration_ms: secs * 1000.0,
            workers: self.workers,
            allocations: self.allocations,
            pattern: self.pattern,
            retained_buffers,
            memory: before.delta(&after),
            throughput_mb_per_sec: if secs > 0.0 { total_mb / secs } else { 0.0 },
        };
        info!(
            "STRESS - {:?} x{} workers x{} allocs in {:.2}ms",
            report.pattern, report.workers, report.allocations, report.duration_ms
        );
        report
    }
}

fn stress_worker(id: usize, allocations: usize, pattern: AllocationPattern) -> Vec<Vec<u8>> {
    let mut kept = Vec::new();
    for j in 0..allocations {
        let mut buf = vec![0u8; ALLOCATION_BYTES];
        buf[0] = id as u8;

        let keep = match pattern {
            AllocationPattern::ShortLived => false,
            AllocationPattern::LongLived => true,
            AllocationPattern::Mixed => j % 2 == 0,
        };
        if keep {
            kept.push(buf);
        } else {
            let _ = hex::encode(Sha256::digest(&buf));
        }

        if j % STRESS_YIELD_INTERVAL == 0 {
            thread::yield_now();
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{AllocationPattern, StressTest};

    fn run(pattern: AllocationPattern) -> super::StressReport {
        StressTest {
            allocations: 4,
            workers: 2,
            pattern,
        }
        .run()
    }

    #[test]
    fn short_lived_keeps_nothing() {
        let r = run(AllocationPattern::ShortLived);
        assert_eq!(r.retained_buffers, 0);
        assert!(r.memory.allocated_mb >= 8.0);
    }

    #[test]
    fn long_lived_keeps_everything() {
        assert_eq!(run(AllocationPattern::LongLived).retained_buffers, 8);
    }

    #[test]
    fn mixed_keeps_even_iterations() {
        assert_eq!(run(AllocationPattern::Mixed).retained_buffers, 4);
    }

    #[test]
    fn pattern_names_are_kebab_case() {
        let p: AllocationPattern = serde_json::from_str("\"long-lived\"").unwrap();
        assert_eq!(p, AllocationPattern::LongLived);
        assert_eq!(
            serde_json::to_string(&AllocationPattern::ShortLived).unwrap(),
            "\"short-lived\""
        );
        assert!(serde_json::from_str::<AllocationPattern>("\"forever\"").is_err());
    }
}
