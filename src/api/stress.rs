use actix_web::{HttpResponse, post, web};

use super::blocking_failed;
use super::models::StressRequest;
use crate::stress::StressTest;

const DEFAULT_ALLOCATIONS: usize = 10;
const DEFAULT_WORKERS: usize = 1;

fn positive_or(value: i64, default: usize) -> usize {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Run the allocation stress workload.
#[post("/stress/")]
pub async fn run_stress(body: web::Json<StressRequest>) -> HttpResponse {
    let req = body.into_inner();
    let test = StressTest {
        allocations: positive_or(req.allocations, DEFAULT_ALLOCATIONS),
        workers: positive_or(req.workers, DEFAULT_WORKERS),
        pattern: req.pattern.unwrap_or_default(),
    };

    match web::block(move || test.run()).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => blocking_failed(e),
    }
}
