use log::info;
use std::sync::RwLock;

use super::{Block, LedgerError, ProofOfWorkMiner};

/// In-memory, append-only chain with Proof-of-Work sealing.
///
/// Appends take the write lock for the whole search, so concurrent callers
/// mine strictly one after another. Readers share the read lock and always
/// get copies.
#[derive(Debug)]
pub struct Ledger {
    chain: RwLock<Vec<Block>>,
    miner: ProofOfWorkMiner,
}

impl Ledger {
    /// Initialize a new ledger with a genesis block.
    pub fn new(difficulty: i64) -> Result<Self, LedgerError> {
        let difficulty = usize::try_from(difficulty)
            .map_err(|_| LedgerError::Configuration(difficulty))?;

        Ok(Self {
            chain: RwLock::new(vec![Block::genesis()]),
            miner: ProofOfWorkMiner::new(difficulty),
        })
    }

    /// Mine and append a new block carrying `data`, returning a copy of it.
    pub fn append(&self, data: impl Into<String>) -> Block {
        let mut chain = self.chain.write().expect("ledger lock poisoned");
        let tip = chain
            .last()
            .expect("ledger always holds at least the genesis block");

        let mut block = Block::candidate(tip, data.into());
        // The search runs while the write lock is held.
        self.miner.seal(&mut block);

        chain.push(block.clone());
        info!(
            "LEDGER - sealed block #{} (hash={}, nonce={})",
            block.index, block.hash, block.nonce
        );
        block
    }

    /// Copy of the whole chain.
    pub fn snapshot(&self) -> Vec<Block> {
        self.chain.read().expect("ledger lock poisoned").clone()
    }

    /// Copy of the most recent block.
    pub fn tip(&self) -> Block {
        self.chain
            .read()
            .expect("ledger lock poisoned")
            .last()
            .cloned()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.read().expect("ledger lock poisoned").len()
    }

    pub fn difficulty(&self) -> usize {
        self.miner.difficulty()
    }

    /// Validate the entire chain: linkage, hashes and PoW.
    /// The genesis block is not held to the difficulty target.
    pub fn verify(&self) -> bool {
        let chain = self.chain.read().expect("ledger lock poisoned");

        let Some(genesis) = chain.first() else {
            return false;
        };
        if genesis.index != 0
            || genesis.previous_hash != "0"
            || genesis.hash != genesis.compute_hash()
        {
            return false;
        }

        chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            current.index == prev.index + 1
                && current.previous_hash == prev.hash
                && current.is_valid(self.difficulty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::LedgerError;
    use crate::blockchain::block::hash;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn negative_difficulty_is_rejected() {
        assert_eq!(Ledger::new(-1).unwrap_err(), LedgerError::Configuration(-1));
    }

    #[test]
    fn fresh_ledger_holds_only_genesis() {
        let ledger = Ledger::new(3).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.difficulty(), 3);

        let chain = ledger.snapshot();
        assert_eq!(chain[0].index, 0);
        assert_eq!(chain[0].previous_hash, "0");
        assert_eq!(chain[0].data, "Genesis Block");
        assert!(ledger.verify());
    }

    #[test]
    fn genesis_is_exempt_from_difficulty() {
        // A difficulty-64 genesis would be astronomically unlikely to pass.
        let ledger = Ledger::new(64).unwrap();
        assert!(ledger.verify());
    }

    #[test]
    fn append_links_to_genesis() {
        let ledger = Ledger::new(1).unwrap();
        let genesis = ledger.tip();

        let block = ledger.append("hello");
        assert_eq!(block.index, 1);
        assert_eq!(block.data, "hello");
        assert_eq!(block.previous_hash, genesis.hash);
        assert!(block.hash.starts_with('0'));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.tip(), block);
    }

    #[test]
    fn chain_invariants_hold_after_appends() {
        let ledger = Ledger::new(2).unwrap();
        for i in 0..4 {
            ledger.append(format!("block-{i}"));
        }

        let chain = ledger.snapshot();
        assert_eq!(chain.len(), 5);
        assert_eq!(chain[0].previous_hash, "0");
        for i in 1..chain.len() {
            assert_eq!(chain[i].index, i as u64);
            assert_eq!(chain[i].previous_hash, chain[i - 1].hash);
            assert!(chain[i].hash.starts_with("00"));
            assert_eq!(chain[i].hash, hash(&chain[i]));
        }
        assert!(ledger.verify());
    }

    #[test]
    fn snapshot_is_idempotent_and_detached() {
        let ledger = Ledger::new(1).unwrap();
        ledger.append("a");

        let first = ledger.snapshot();
        let mut second = ledger.snapshot();
        assert_eq!(first, second);

        second[1].data = "changed".into();
        assert_eq!(ledger.snapshot(), first);
    }

    #[test]
    fn concurrent_appends_are_serialized() {
        const N: usize = 16;
        let ledger = Arc::new(Ledger::new(1).unwrap());

        let handles: Vec<_> = (0..N)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || ledger.append(format!("t{i}")))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(ledger.len(), N + 1);
        let indices: HashSet<u64> = ledger.snapshot().iter().map(|b| b.index).collect();
        assert_eq!(indices, (0..=N as u64).collect());
        assert!(ledger.verify());
    }
}
