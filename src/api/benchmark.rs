use actix_web::{HttpResponse, post, web};

use super::blocking_failed;
use super::models::BenchmarkRequest;
use crate::monitoring::AllocationBenchmark;

/// Run the single-threaded allocation benchmark.
#[post("/benchmark/")]
pub async fn run_benchmark(body: web::Json<BenchmarkRequest>) -> HttpResponse {
    let req = body.into_inner();
    let bench = AllocationBenchmark::new(req.allocations, req.size_kb, req.pattern);

    match web::block(move || bench.run()).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => blocking_failed(e),
    }
}
