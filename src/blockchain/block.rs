use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::GENESIS_DATA;

/// A single block in the ledger carrying an opaque data payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: DateTime<Utc>, // set once at creation
    pub data: String,
    pub previous_hash: String,
    pub hash: String, // cached hash of the block
    pub nonce: u64,   // Proof-of-Work nonce
}

impl Block {
    /// Create the genesis block. Its hash is computed directly and is not
    /// required to meet any difficulty target.
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: Utc::now(),
            data: GENESIS_DATA.to_string(),
            previous_hash: String::from("0"),
            hash: String::new(),
            nonce: 0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create an unsealed candidate extending `tip`. Call
    /// `ProofOfWorkMiner::seal` before appending it anywhere.
    pub fn candidate(tip: &Block, data: String) -> Self {
        Self {
            index: tip.index + 1,
            timestamp: Utc::now(),
            data,
            previous_hash: tip.hash.clone(),
            hash: String::new(),
            nonce: 0,
        }
    }

    /// SHA-256 of the canonical field string, lowercase hex.
    pub fn compute_hash(&self) -> String {
        hash(self)
    }

    /// True when the first `difficulty` hex characters of the cached hash are `'0'`.
    pub fn meets_difficulty(&self, difficulty: usize) -> bool {
        self.hash.len() >= difficulty && self.hash.bytes().take(difficulty).all(|c| c == b'0')
    }

    /// Cached hash matches content and satisfies the PoW difficulty.
    /// Chain linkage is checked by `Ledger::verify`.
    pub fn is_valid(&self, difficulty: usize) -> bool {
        self.hash == self.compute_hash() && self.meets_difficulty(difficulty)
    }
}

/// Canonical preimage: `index:timestamp:data:previous_hash:nonce`, with the
/// timestamp rendered as RFC 3339 at nanosecond precision.
pub fn hash(block: &Block) -> String {
    let preimage = format!(
        "{}:{}:{}:{}:{}",
        block.index,
        block
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Nanos, true),
        block.data,
        block.previous_hash,
        block.nonce
    );
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}
