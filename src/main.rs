mod api;
mod blockchain;
mod config;
mod monitoring;
mod stress;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use api::AppState;
use config::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    print_scheduler_info();

    let state = AppState::new(config.difficulty)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!(
        "⛓️ Starting PoW ledger at http://{}:{} (difficulty={}, genesis={})",
        config.host,
        config.port,
        state.ledger.difficulty(),
        state.ledger.tip().hash
    );

    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn print_scheduler_info() {
    info!(
        "CPUs: {} logical / {} physical, available parallelism: {}",
        num_cpus::get(),
        num_cpus::get_physical(),
        std::thread::available_parallelism().map_or(1, |n| n.get())
    );
}
