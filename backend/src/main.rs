//! Service entry-point: wires logging, configuration, persistence, and REST.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::DirectUserService;
use backend::domain::ports::UserService;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};
use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)?;
    let repository = Arc::new(DieselUserRepository::new(pool));
    let users: Arc<dyn UserService> = Arc::new(DirectUserService::new(repository));

    let http_state = web::Data::new(HttpState::new(users));
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness flag stays shared.
    let server_health_state = health_state.clone();

    info!(%bind_addr, "starting server");
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(http_state.clone())
            .app_data(server_health_state.clone())
            .service(get_user)
            .service(list_users)
            .service(create_user)
            .service(update_user)
            .service(delete_user)
            .service(ready)
            .service(live);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .disable_signals()
    .bind(&bind_addr)?
    .run();

    // Shutdown path: fail the probes first, then stop accepting connections
    // and let in-flight requests finish.
    let server_handle = server.handle();
    let drain_state = health_state.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received, draining");
            drain_state.begin_drain();
            server_handle.stop(true).await;
        }
    });

    health_state.mark_ready();
    server.await
}
