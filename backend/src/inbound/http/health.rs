//! Health endpoints: liveness and readiness probes for orchestration.
//!
//! The service moves through three phases. It starts alive but not ready,
//! becomes ready once the pool and routes are wired, and enters a draining
//! phase when shutdown begins. Draining fails both probes so orchestrators
//! stop routing traffic while in-flight requests complete.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::StatusCode, http::header, web};

const STARTING: u8 = 0;
const READY: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase shared between the server loop and the probes.
#[derive(Default)]
pub struct HealthState {
    phase: AtomicU8,
}

impl HealthState {
    /// Create a state in the starting phase: alive, not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the ready phase once dependencies are initialised.
    pub fn mark_ready(&self) {
        self.phase.store(READY, Ordering::Release);
    }

    /// Enter the draining phase; both probes fail from here on.
    pub fn begin_drain(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    fn phase(&self) -> u8 {
        self.phase.load(Ordering::Acquire)
    }

    /// True while the service accepts new traffic.
    pub fn is_ready(&self) -> bool {
        self.phase() == READY
    }

    /// True until a drain begins. A starting service is alive but not ready.
    pub fn is_alive(&self) -> bool {
        self.phase() != DRAINING
    }
}

fn probe(probe_ok: bool) -> HttpResponse {
    let status = if probe_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    // Probe results must never be cached by intermediaries.
    HttpResponse::build(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the pool and server are initialised, 503
/// before that and again while draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe: 200 until shutdown begins draining the server.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is draining and will stop")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}
