//! HTTP server for the site
//!
//! ## Routes
//!
//! - `GET /` - Home page (latest posts)
//! - `GET /viewBlogs` - All posts
//! - `GET /blog/:slug` - One post
//! - `GET /randomThoughts` - All events
//! - `GET /random/:slug` - One event
//! - `GET /css/*` - Stylesheets

pub mod error;
mod handlers;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Request};
use axum::routing::get;
use axum::Router;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::config::SiteConfig;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Shared state for all handlers
///
/// The site is published through a watch channel so a reload can swap in a
/// freshly built site without touching the one readers already hold.
#[derive(Clone)]
pub struct AppState {
    site: watch::Receiver<Arc<Site>>,
    templates: Arc<TemplateRenderer>,
}

impl AppState {
    /// Create the state and the sender used to publish a rebuilt site
    pub fn new(site: Site, templates: TemplateRenderer) -> (Self, watch::Sender<Arc<Site>>) {
        let (tx, rx) = watch::channel(Arc::new(site));
        let state = Self {
            site: rx,
            templates: Arc::new(templates),
        };
        (state, tx)
    }

    /// Snapshot of the current site
    pub fn site(&self) -> Arc<Site> {
        self.site.borrow().clone()
    }
}

/// Build the router with its middleware
pub fn router(state: AppState, config: &SiteConfig) -> Result<Router> {
    let cache_control = HeaderValue::from_str(&format!("public, max-age={}", config.cache_max_age))
        .context("invalid cache_max_age")?;

    let app = Router::new()
        .route("/", get(handlers::view_home))
        .route("/viewBlogs", get(handlers::view_blogs))
        .route("/blog/:slug", get(handlers::view_post))
        .route("/randomThoughts", get(handlers::view_randoms))
        .route("/random/:slug", get(handlers::view_random))
        .nest_service("/css", ServeDir::new(&config.css_dir))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TimeoutLayer::new(
            config.read_timeout() + config.write_timeout(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            cache_control,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        );

    Ok(app)
}

/// Start the server, optionally reloading content when files change
pub async fn start(site: Site, watch: bool) -> Result<()> {
    let config = site.config.clone();
    let templates = TemplateRenderer::load(&config, &config.html_dir)?;
    let (state, publisher) = AppState::new(site, templates);

    let app = router(state, &config)?;

    let addr: SocketAddr = config
        .tcp_address()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.tcp_address()))?;

    if watch {
        // Detached: the process exits on shutdown without waiting for it
        std::thread::spawn(move || {
            if let Err(e) = watch_and_reload(config, publisher) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot listen on {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// How often the watcher checks whether the server is still running
const WATCH_POLL: Duration = Duration::from_millis(250);

/// Rebuild the site whenever content files change
///
/// A failed rebuild is logged and the current site stays live. Returns once
/// every receiver of `publisher` is gone.
fn watch_and_reload(config: SiteConfig, publisher: watch::Sender<Arc<Site>>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let dirs: [&PathBuf; 2] = [&config.posts_dir, &config.events_dir];
    for dir in dirs {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("cannot watch {:?}", dir))?;
        tracing::info!("Watching {:?} for changes", dir);
    }

    while !publisher.is_closed() {
        match rx.recv_timeout(WATCH_POLL) {
            Ok(Ok(events)) => {
                for event in &events {
                    tracing::debug!("Content changed: {:?}", event.path);
                }

                match Site::build(config.clone()) {
                    Ok(site) => {
                        tracing::info!("Content reloaded");
                        if publisher.send(Arc::new(site)).is_err() {
                            // Server is gone
                            break;
                        }
                    }
                    Err(e) => tracing::error!("Reload failed, keeping current content: {:#}", e),
                }
            }
            Ok(Err(e)) => tracing::error!("Watch error: {:?}", e),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::debug!("Stopped watching content");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
