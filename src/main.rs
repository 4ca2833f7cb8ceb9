use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use club_events::adapters::events::LoggingEventPublisher;
use club_events::adapters::http::middleware::init_logging;
use club_events::adapters::http::{events_router, EventsAppState};
use club_events::adapters::memory::{
    InMemoryEventCatalog, InMemoryMemberDirectory, InMemoryRegistrationRepository,
};
use club_events::adapters::postgres::{
    create_pool, PostgresEventReader, PostgresMemberDirectory, PostgresRegistrationRepository,
};
use club_events::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_logging(&config.server);
    info!("Starting club-events v{}", env!("CARGO_PKG_VERSION"));

    let refund_policy = config.registration.refund_policy();
    let event_publisher = Arc::new(LoggingEventPublisher::new());

    let state = match &config.database {
        Some(database) => {
            let pool = create_pool(database).await?;
            if database.run_migrations {
                info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("Migrations completed");
            }
            EventsAppState::new(
                Arc::new(PostgresEventReader::new(pool.clone())),
                Arc::new(PostgresMemberDirectory::new(pool.clone())),
                Arc::new(PostgresRegistrationRepository::new(pool)),
                event_publisher,
                refund_policy,
            )
        }
        None => {
            tracing::warn!("No database configured; using in-memory storage");
            EventsAppState::new(
                Arc::new(InMemoryEventCatalog::new()),
                Arc::new(InMemoryMemberDirectory::new()),
                Arc::new(InMemoryRegistrationRepository::new()),
                event_publisher,
                refund_policy,
            )
        }
    };

    let app = events_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
