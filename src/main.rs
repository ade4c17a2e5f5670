use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod app;
mod controllers;
mod error;
mod models;
mod response;
mod services;
mod settings;
mod store;
mod telemetry;
mod utils;

use crate::services::OrmService;
use crate::settings::{Backend, Settings};
use crate::store::{DocumentStore, MemoryStore, MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        database = %settings.database.name,
        "mflix-api starting"
    );

    let store: Arc<dyn DocumentStore> = match settings.database.backend {
        Backend::Mongo => Arc::new(
            MongoStore::connect(&settings.database.uri, settings.database.name.clone())
                .await
                .with_context(|| "failed to configure MongoDB client")?,
        ),
        Backend::Memory => {
            tracing::warn!("using the in-memory store; documents are lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let orm = Arc::new(OrmService::new(store));

    // Ping the server to see if you can connect to the cluster
    orm.ping()
        .await
        .with_context(|| "document store did not answer ping")?;
    tracing::info!("document store reachable");

    let mut router = match settings.server.base_path.as_str() {
        "" => app::build_router(orm),
        base_path => Router::new()
            .nest(base_path, app::build_router(orm))
            .fallback(controllers::not_found),
    };

    if let Some(origin) = &settings.server.allowed_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid allowed origin '{origin}'"))?;
        router = router.layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_origin(origin)
                .allow_headers([header::CONTENT_TYPE]),
        );
    }
    let router = router.layer(TraceLayer::new_for_http());

    let address = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, base_path = %settings.server.base_path, "listening");

    axum::serve(listener, router)
        .await
        .with_context(|| "server error")?;
    Ok(())
}
