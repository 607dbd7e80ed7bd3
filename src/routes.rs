use crate::api::{attendance, auth, employee, history, organization, work_shift};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::{Context, Result};
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP limiters, built once and shared by every worker so quotas are global.
#[derive(Clone)]
pub struct RateLimits {
    scan: Limiter,
    login: Limiter,
    protected: Limiter,
}

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Result<Limiter> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .with_context(|| format!("invalid rate limit: {} requests per minute", requests_per_min))?;
    Ok(Arc::new(Governor::new(&cfg)))
}

impl RateLimits {
    pub fn new(scan_per_min: u32, login_per_min: u32, protected_per_min: u32) -> Result<Self> {
        Ok(Self {
            scan: build_limiter(scan_per_min)?,
            login: build_limiter(login_per_min)?,
            protected: build_limiter(protected_per_min)?,
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limits: &RateLimits) {
    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(limits.login.clone())
                .route(web::post().to(auth::login)),
        ),
    );

    cfg.service(
        web::scope(api_prefix)
            .wrap(limits.protected.clone())
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    // /employees/{employee_id}/records
                    .service(
                        web::resource("/{employee_id}/records")
                            .route(web::get().to(employee::employee_records)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/scan, tighter limit on top of the protected one
                    .service(
                        web::resource("/scan")
                            .wrap(limits.scan.clone())
                            .route(web::post().to(attendance::scan)),
                    )
                    .service(web::resource("/summary").route(web::get().to(attendance::summary)))
                    .service(
                        web::resource("/{employee_id}/clock-in")
                            .route(web::post().to(attendance::clock_in)),
                    )
                    .service(
                        web::resource("/{employee_id}/clock-out")
                            .route(web::post().to(attendance::clock_out)),
                    )
                    .service(
                        web::resource("/{employee_id}/toggle")
                            .route(web::post().to(attendance::toggle)),
                    ),
            )
            .service(
                web::scope("/attendance-history")
                    .service(
                        web::resource("/employees-combo")
                            .route(web::get().to(history::employees_combo)),
                    )
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(history::employee_history)),
                    ),
            )
            .service(
                web::scope("/work-shifts")
                    .service(
                        web::resource("")
                            .route(web::post().to(work_shift::create_work_shift)),
                    )
                    .service(
                        web::resource("/list").route(web::get().to(work_shift::list_work_shifts)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(work_shift::update_work_shift))
                            .route(web::delete().to(work_shift::delete_work_shift)),
                    ),
            )
            .service(
                web::scope("/organization")
                    .service(
                        web::resource("/tolerance").route(web::get().to(organization::get_tolerance)),
                    )
                    .service(
                        web::resource("/update-tolerance")
                            .route(web::put().to(organization::update_tolerance)),
                    )
                    .service(
                        web::resource("/current-qr").route(web::get().to(organization::current_qr)),
                    )
                    .service(
                        web::resource("/regenerate-qr")
                            .route(web::patch().to(organization::regenerate_qr)),
                    )
                    .service(
                        web::resource("/update-qr-name")
                            .route(web::patch().to(organization::update_qr_name)),
                    ),
            ),
    );
}
