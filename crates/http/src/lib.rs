//! HTTP server facade for Bookrack with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use bookrack_kernel::{AppState, ModuleRegistry};

pub mod error;
pub mod flash;
pub mod forms;
pub mod html;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry and shared state
pub async fn start_server(registry: &ModuleRegistry, state: AppState) -> anyhow::Result<()> {
    let settings = state.settings.clone();

    tracing::info!(
        "starting HTTP server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    let app = build_router(registry, &settings.server, state).context("failed to build HTTP router")?;

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
fn build_router(
    registry: &ModuleRegistry,
    server: &bookrack_kernel::settings::ServerSettings,
    state: AppState,
) -> anyhow::Result<Router> {
    let mut router_builder = RouterBuilder::new();

    // Health check route
    router_builder = router_builder.route("/healthz", get(health_check));

    // Mount module routes at the root
    for module in registry.modules() {
        router_builder = router_builder.mount_module(module.name(), module.routes());
    }

    // OpenAPI documentation
    router_builder = router_builder.with_openapi(registry);

    // Global middlewares wrap everything registered above
    router_builder = router_builder
        .with_tracing()
        .with_request_id()
        .with_timeout(server.request_timeout_ms);

    Ok(router_builder.build(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
