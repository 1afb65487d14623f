use actix_web::{HttpResponse, Responder, get, web};

use super::models::AppState;
use crate::monitoring::RuntimeStats;

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(RuntimeStats::collect(state.started_at))
}
