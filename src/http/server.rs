//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve theme files statically under `/content/themes`
//! - Dispatch every other path to the page router
//! - Apply hot-reloaded configuration to subsequent requests
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::assets::{ContentTypeProbe, HttpProbe};
use crate::config::watcher::apply_updates;
use crate::config::SiteConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::{page_response, render_failed};
use crate::observability::metrics;
use crate::routing::PageRouter;
use crate::theme::context::THEMES_URL_PATH;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<SiteConfig>>,
    pub pages: Arc<PageRouter>,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: Arc<ArcSwap<SiteConfig>>,
}

impl HttpServer {
    /// Create a new HTTP server probing assets over HTTP.
    pub fn new(config: SiteConfig) -> Self {
        let probe = HttpProbe::new(Duration::from_secs(config.assets.probe_timeout_secs));
        Self::with_probe(config, Arc::new(probe))
    }

    /// Create a new HTTP server with a custom asset probe.
    pub fn with_probe(config: SiteConfig, probe: Arc<dyn ContentTypeProbe>) -> Self {
        let state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config.clone())),
            pages: Arc::new(PageRouter::new(probe)),
        };

        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config: state.config,
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The static file root and the request timeout are fixed at startup;
    /// everything else follows reloaded configuration.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        Router::new()
            .nest_service(THEMES_URL_PATH, ServeDir::new(&config.paths.themes_dir))
            .fallback(page_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The assembled router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<SiteConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        tokio::spawn(apply_updates(
            self.config.clone(),
            config_updates,
            shutdown.resubscribe(),
        ));

        let mut shutdown = shutdown;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<SiteConfig> {
        self.config.load_full()
    }
}

/// Render the theme page for the request path.
async fn page_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id_str().to_string();
    let path = request.uri().path().to_string();
    let config = state.config.load_full();

    tracing::debug!(
        request_id = %request_id,
        path = %path,
        theme = %config.site.theme,
        "Rendering page"
    );

    let charset = config.site.charset.clone();
    let response = match state.pages.dispatch(config, &path).await {
        Ok(page) => page_response(page, &charset),
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Render failed");
            render_failed()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}
