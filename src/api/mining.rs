use actix_web::{HttpResponse, post, web};
use std::num::NonZeroUsize;

use super::models::{AppState, MineRequest, MineResponse};
use super::{blocking_failed, missing_value};
use crate::blockchain::ParallelMiningCoordinator;
use crate::monitoring::MemorySnapshot;

/// Non-positive worker counts run a single worker.
fn worker_count(requested: i64) -> NonZeroUsize {
    usize::try_from(requested)
        .ok()
        .and_then(NonZeroUsize::new)
        .unwrap_or(NonZeroUsize::MIN)
}

/// Mine `workers` blocks concurrently against the shared ledger.
#[post("/mine/")]
pub async fn mine_parallel(
    state: web::Data<AppState>,
    body: web::Json<MineRequest>,
) -> HttpResponse {
    let MineRequest { data, workers } = body.into_inner();
    if data.is_empty() {
        return missing_value();
    }
    let workers = worker_count(workers);

    let result = web::block(move || {
        let before = MemorySnapshot::capture();
        let (blocks, elapsed) =
            ParallelMiningCoordinator::new(&state.ledger).mine_parallel(&data, workers);
        let after = MemorySnapshot::capture();

        MineResponse {
            blocks,
            duration_ms: elapsed.as_secs_f64() * 1000.0,
            workers: workers.get(),
            total_blocks: state.ledger.len(),
            memory: before.delta(&after),
        }
    })
    .await;

    match result {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => blocking_failed(e),
    }
}
