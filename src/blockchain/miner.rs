use log::debug;
use std::thread;

use super::{Block, YIELD_INTERVAL};

/// Brute-force Proof-of-Work search over the block nonce.
#[derive(Debug, Clone, Copy)]
pub struct ProofOfWorkMiner {
    difficulty: usize,
    yield_interval: u64,
}

impl ProofOfWorkMiner {
    pub fn new(difficulty: usize) -> Self {
        Self::with_yield_interval(difficulty, YIELD_INTERVAL)
    }

    /// Miner yielding every `yield_interval` nonces (at least 1).
    pub fn with_yield_interval(difficulty: usize, yield_interval: u64) -> Self {
        Self {
            difficulty,
            yield_interval: yield_interval.max(1),
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Seal `candidate` in place: increment the nonce until its hash starts
    /// with `difficulty` hex zeros. There is no iteration bound, so an
    /// unreachable target never returns.
    ///
    /// Every `yield_interval` nonces the thread yields to the OS scheduler so
    /// sibling searches sharing a core get a turn. The candidate is untouched
    /// by the yield.
    pub fn seal(&self, candidate: &mut Block) {
        let target = "0".repeat(self.difficulty);
        loop {
            candidate.hash = candidate.compute_hash();
            if candidate.hash.starts_with(&target) {
                break;
            }
            candidate.nonce = candidate.nonce.wrapping_add(1);

            if candidate.nonce % self.yield_interval == 0 {
                debug!(
                    "MINER - block #{} still searching at nonce {}",
                    candidate.index, candidate.nonce
                );
                thread::yield_now();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProofOfWorkMiner;
    use crate::blockchain::Block;
    use crate::blockchain::block::hash;

    #[test]
    fn mining_produces_leading_zeros() {
        let mut b = Block::candidate(&Block::genesis(), "hello".into());
        ProofOfWorkMiner::new(2).seal(&mut b);
        assert!(b.hash.starts_with("00"));
        assert!(b.is_valid(2));
        assert_eq!(b.hash, hash(&b));
    }

    #[test]
    fn yielding_on_every_nonce_keeps_search_state() {
        let candidate = Block::candidate(&Block::genesis(), "yield".into());

        let mut yielding = candidate.clone();
        ProofOfWorkMiner::with_yield_interval(2, 1).seal(&mut yielding);
        let mut plain = candidate;
        ProofOfWorkMiner::new(2).seal(&mut plain);

        assert_eq!(yielding.nonce, plain.nonce);
        assert_eq!(yielding.hash, plain.hash);
        assert_eq!(yielding.hash, hash(&yielding));
        assert!(yielding.hash.starts_with("00"));

        let mut earlier = yielding.clone();
        for nonce in 0..yielding.nonce {
            earlier.nonce = nonce;
            assert!(!hash(&earlier).starts_with("00"));
        }
    }

    #[test]
    fn zero_yield_interval_is_clamped() {
        let mut b = Block::candidate(&Block::genesis(), "clamp".into());
        ProofOfWorkMiner::with_yield_interval(1, 0).seal(&mut b);
        assert!(b.is_valid(1));
    }

    #[test]
    fn zero_difficulty_accepts_first_nonce() {
        let mut b = Block::candidate(&Block::genesis(), "easy".into());
        ProofOfWorkMiner::new(0).seal(&mut b);
        assert_eq!(b.nonce, 0);
        assert_eq!(b.hash, hash(&b));
    }

    #[test]
    fn sealed_nonce_is_the_smallest_satisfying_one() {
        let mut b = Block::candidate(&Block::genesis(), "min".into());
        ProofOfWorkMiner::new(1).seal(&mut b);

        let mut probe = b.clone();
        for nonce in 0..b.nonce {
            probe.nonce = nonce;
            assert!(!hash(&probe).starts_with('0'));
        }
    }
}
