/*
   Module `inbound` exposes the HTTP surface of the server: the axum router,
   its shared state, and the request handlers.
*/

mod api;
mod handlers;

use crate::domain::ports::MapService;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Runtime configuration for the HTTP server.
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
}

/// The global application state shared between all request handlers.
#[derive(Debug, Clone)]
struct AppState<MS: MapService> {
    map_service: Arc<MS>,
}

/// The application's HTTP server, generic over the [MapService] it fronts.
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the configured port.
    pub async fn new(
        map_service: impl MapService,
        config: HttpServerConfig<'_>,
    ) -> anyhow::Result<Self> {
        let state = AppState {
            map_service: Arc::new(map_service),
        };

        let router = Router::new()
            .nest("/api", api_routes())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("failed to listen on port {}", config.port))?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server until the process is stopped.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!(
            "listening on {}",
            self.listener
                .local_addr()
                .context("failed to read the bound address")?
        );

        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;

        Ok(())
    }
}

fn api_routes<MS: MapService>() -> Router<AppState<MS>> {
    Router::new()
        .route("/maps", post(handlers::create_map_handler::<MS>))
        .route("/maps/render", get(handlers::render_map_handler::<MS>))
}
