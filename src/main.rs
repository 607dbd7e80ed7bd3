use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use chrono::Utc;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod docs;
mod ledger;
mod model;
mod routes;
mod seed;
mod utils;

use config::Config;
use ledger::AttendanceLedger;
use ledger::events::TracingListener;
use routes::RateLimits;

use crate::docs::ApiDoc;
use crate::utils::scan_cooldown::ScanCooldown;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "QR attendance is running"
}

fn build_ledger(config: &Config) -> anyhow::Result<AttendanceLedger> {
    if config.seed_demo_data {
        let seed = seed::demo_seed(
            Utc::now(),
            &config.access_code_name,
            config.default_tolerance_minutes,
        )?;
        info!(employees = seed.employees.len(), records = seed.records.len(), "Loaded demo data");
        Ok(AttendanceLedger::from_seed(seed))
    } else {
        Ok(AttendanceLedger::new(
            &config.access_code_name,
            config.default_tolerance_minutes,
        ))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let ledger = Arc::new(build_ledger(&config)?);
    ledger.subscribe(Arc::new(TracingListener));
    info!(token = %ledger.access_code().token, "Access code ready");

    let ledger = Data::from(ledger);
    let cooldown = Data::new(ScanCooldown::new(config.scan_cooldown));
    let limits = RateLimits::new(
        config.rate_scan_per_min,
        config.rate_login_per_min,
        config.rate_protected_per_min,
    )?;
    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(ledger.clone())
            .app_data(cooldown.clone())
            .service(index)
            // auth + api routes with rate limiting
            .configure(|cfg| routes::configure(cfg, &api_prefix, &limits))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
