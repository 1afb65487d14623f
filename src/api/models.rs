use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::blockchain::{Block, Ledger, LedgerError};
use crate::monitoring::MemoryDelta;
use crate::stress::AllocationPattern;

/// Shared application state: one ledger for the whole process.
pub struct AppState {
    pub ledger: Ledger,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(difficulty: i64) -> Result<Self, LedgerError> {
        Ok(Self {
            ledger: Ledger::new(difficulty)?,
            started_at: Instant::now(),
        })
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/* ---------- Block API Models ---------- */

#[derive(Deserialize)]
pub struct AddBlockRequest {
    #[serde(default)]
    pub data: String,
}

#[derive(Serialize)]
pub struct AddBlockResponse {
    pub block: Block,
    pub duration_ms: f64,
    pub memory: MemoryDelta,
}

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub difficulty: usize,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: usize,
}

/* ---------- Mining API Models ---------- */

#[derive(Deserialize)]
pub struct MineRequest {
    #[serde(default)]
    pub data: String,
    #[serde(default, alias = "goroutines")]
    pub workers: i64,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub blocks: Vec<Block>, // completion order
    pub duration_ms: f64,
    pub workers: usize,
    pub total_blocks: usize,
    pub memory: MemoryDelta,
}

/* ---------- Stress API Models ---------- */

#[derive(Deserialize)]
pub struct StressRequest {
    #[serde(default)]
    pub allocations: i64,
    #[serde(default, alias = "goroutines")]
    pub workers: i64,
    #[serde(default)]
    pub pattern: Option<AllocationPattern>,
}

/* ---------- Benchmark API Models ---------- */

#[derive(Deserialize)]
pub struct BenchmarkRequest {
    #[serde(default)]
    pub allocations: i64,
    #[serde(default)]
    pub size_kb: i64,
    #[serde(default)]
    pub pattern: Option<AllocationPattern>,
}
