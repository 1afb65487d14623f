use log::info;
use std::num::NonZeroUsize;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::{Block, Ledger};

/// Fans out concurrent appends against one ledger and joins them.
#[derive(Debug, Clone, Copy)]
pub struct ParallelMiningCoordinator<'a> {
    ledger: &'a Ledger,
}

impl<'a> ParallelMiningCoordinator<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Spawn `workers` threads, worker `i` appending `"{data}-worker-{i}"`.
    ///
    /// Blocks until every worker has finished. The returned blocks are in
    /// completion order, which varies between runs; the elapsed time spans
    /// dispatch to the last completion.
    pub fn mine_parallel(&self, data: &str, workers: NonZeroUsize) -> (Vec<Block>, Duration) {
        let start = Instant::now();
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            for id in 0..workers.get() {
                let tx = tx.clone();
                let ledger = self.ledger;
                scope.spawn(move || {
                    let block = ledger.append(format!("{data}-worker-{id}"));
                    tx.send(block).expect("result receiver outlives the worker scope");
                });
            }
        });
        drop(tx);

        let blocks: Vec<Block> = rx.iter().collect();
        let elapsed = start.elapsed();
        info!(
            "COORDINATOR - {} workers mined {} blocks in {:?}",
            workers,
            blocks.len(),
            elapsed
        );
        (blocks, elapsed)
    }
}
