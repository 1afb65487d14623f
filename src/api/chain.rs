use actix_web::{HttpResponse, get, post, web};
use log::debug;
use std::time::Instant;

use super::models::{AddBlockRequest, AddBlockResponse, AppState, ChainResponse, ValidateResponse};
use super::{blocking_failed, missing_value};
use crate::monitoring::MemorySnapshot;

/// Get the full chain.
#[get("/blocks/")]
pub async fn list_blocks(state: web::Data<AppState>) -> HttpResponse {
    let result = web::block(move || {
        let chain = state.ledger.snapshot();
        ChainResponse {
            length: chain.len(),
            difficulty: state.ledger.difficulty(),
            chain,
        }
    })
    .await;

    match result {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => blocking_failed(e),
    }
}

/// Mine one block carrying `data` and report its heap cost.
#[post("/blocks/")]
pub async fn add_block(
    state: web::Data<AppState>,
    body: web::Json<AddBlockRequest>,
) -> HttpResponse {
    let data = body.into_inner().data;
    if data.is_empty() {
        return missing_value();
    }

    let result = web::block(move || {
        let before = MemorySnapshot::capture();
        let start = Instant::now();
        let block = state.ledger.append(data);
        let elapsed = start.elapsed();
        let after = MemorySnapshot::capture();

        AddBlockResponse {
            block,
            duration_ms: elapsed.as_secs_f64() * 1000.0,
            memory: before.delta(&after),
        }
    })
    .await;

    match result {
        Ok(resp) => {
            debug!(
                "API - block #{} mined in {:.2}ms",
                resp.block.index, resp.duration_ms
            );
            HttpResponse::Created().json(resp)
        }
        Err(e) => blocking_failed(e),
    }
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    let result = web::block(move || ValidateResponse {
        valid: state.ledger.verify(),
        length: state.ledger.len(),
        difficulty: state.ledger.difficulty(),
    })
    .await;

    match result {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => blocking_failed(e),
    }
}
