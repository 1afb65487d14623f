pub mod block;
pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod miner;

pub use block::Block;
pub use coordinator::ParallelMiningCoordinator;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use miner::ProofOfWorkMiner;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: i64 = 4;

/// Payload of the hard-coded first block.
pub const GENESIS_DATA: &str = "Genesis Block";

/// Nonces tried between two scheduler yields during a search.
pub const YIELD_INTERVAL: u64 = 100_000;
