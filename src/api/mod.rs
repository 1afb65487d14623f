mod benchmark;
mod chain;
mod health;
mod mining;
pub mod models;
mod stats;
mod stress;

use actix_web::HttpResponse;
use actix_web::error::{BlockingError, InternalError};
use actix_web::web::{self, ServiceConfig};
use log::error;

pub use models::AppState;
use models::ErrorResponse;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = HttpResponse::BadRequest().json(ErrorResponse {
            error: err.to_string(),
        });
        InternalError::from_response(err, body).into()
    }))
    .service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::list_blocks)
            .service(chain::add_block)
            .service(chain::validate_chain)
            .service(mining::mine_parallel)
            .service(stress::run_stress)
            .service(benchmark::run_benchmark)
            .service(stats::get_stats),
    );
}

pub(crate) fn missing_value() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "missing required value".to_string(),
    })
}

pub(crate) fn blocking_failed(err: BlockingError) -> HttpResponse {
    error!("blocking task failed: {err}");
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: err.to_string(),
    })
}
