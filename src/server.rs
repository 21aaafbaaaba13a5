//! HTTP serving layer.
//!
//! Materializes the startup wiring into a running server: the front
//! dispatcher mounted on the root catch-all, the encoding filter installed
//! as middleware, request logging, a health endpoint, and graceful
//! shutdown on ctrl-c.

use crate::bootstrap::{AppWiring, EncodingFilter};
use crate::config::Settings;
use crate::error::BootstrapError;
use axum::{
    Router,
    extract::{Request, State},
    http::{StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use figment::Figment;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Wiring extracted from the root scope. The shell logs it at startup and
/// hands it to the business and persistence layers.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RootWiring {
    #[serde(default)]
    pub datasource: DatasourceWiring,

    #[serde(default)]
    pub cache: CacheWiring,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasourceWiring {
    #[serde(default = "default_datasource_url")]
    pub url: String,

    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheWiring {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

/// Wiring extracted from the web scope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebWiring {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_welcome")]
    pub welcome: String,
}

fn default_datasource_url() -> String {
    "petclinic.db".to_string()
}
fn default_pool_size() -> u32 {
    8
}
fn default_true() -> bool {
    true
}
fn default_cache_ttl() -> u64 {
    300
}
fn default_title() -> String {
    "Petclinic".to_string()
}
fn default_welcome() -> String {
    "Welcome to the Pet Clinic".to_string()
}

impl Default for DatasourceWiring {
    fn default() -> Self {
        Self {
            url: default_datasource_url(),
            pool_size: default_pool_size(),
        }
    }
}

impl Default for CacheWiring {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl Default for WebWiring {
    fn default() -> Self {
        Self {
            title: default_title(),
            welcome: default_welcome(),
        }
    }
}

struct AppState {
    profile: String,
    web: WebWiring,
}

/// Extract typed wiring from a scope figment, falling back to defaults
/// when the named resources are malformed. Startup continues either way;
/// the resource files belong to their consumers, not to the shell.
fn extract_or_default<T>(scope_name: &str, figment: Figment) -> T
where
    T: Default + for<'de> Deserialize<'de>,
{
    match figment.extract() {
        Ok(wired) => wired,
        Err(e) => {
            let err = BootstrapError::ScopeRead {
                scope: scope_name.to_string(),
                source: Box::new(e),
            };
            warn!("{err}; continuing with default wiring");
            T::default()
        }
    }
}

/// Assemble the application router from the startup wiring.
///
/// The dispatcher is bound to each declared route mapping, and the root
/// mapping additionally catches every unmatched path, so all requests
/// under the mount point flow through it. Filters wrap the whole router.
pub fn build_router(wiring: &AppWiring, web: WebWiring, request_log: bool) -> Router {
    let state = Arc::new(AppState {
        profile: wiring.active_profile.clone(),
        web,
    });

    let mut router = Router::new().route("/health", get(health_check));
    for mapping in wiring.route_mappings() {
        router = router.route(mapping, get(dispatch));
    }
    let mut router = router.fallback(dispatch).with_state(state);

    for filter in wiring.request_filters() {
        router = router.layer(middleware::from_fn(move |request: Request, next: Next| {
            force_encoding(filter, request, next)
        }));
    }
    if request_log {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Run the server until completion or ctrl-c.
pub async fn serve(wiring: AppWiring, settings: Settings) -> anyhow::Result<()> {
    info!(profile = %wiring.active_profile, "materializing application wiring");

    let root: RootWiring = extract_or_default(wiring.root.name(), wiring.root.figment());
    info!(
        url = %root.datasource.url,
        pool_size = root.datasource.pool_size,
        "datasource wiring ready for the persistence layer"
    );
    if root.cache.enabled {
        info!(ttl_secs = root.cache.ttl_secs, "cache wiring enabled");
    }

    // Web wiring layered over the root figment: root values are visible to
    // the presentation tier unless the web resources shadow them.
    let web: WebWiring = extract_or_default(
        wiring.web.name(),
        wiring.root.figment().merge(wiring.web.figment()),
    );

    let router = build_router(&wiring, web, settings.server.request_log);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind)
        .await
        .map_err(|source| BootstrapError::Bind {
            addr: settings.server.bind.clone(),
            source,
        })?;
    info!("listening on http://{}", settings.server.bind);
    info!("health check: http://{}/health", settings.server.bind);

    let server = axum::serve(listener, router);

    tokio::select! {
        result = server => {
            result?;
        }
        _ = shutdown_signal() => {
            info!("shutting down HTTP server");
        }
    }

    info!("HTTP server shut down gracefully");
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl+c");
    info!("received shutdown signal");
}

/// The front dispatcher: single entry point for every request path under
/// the mount point. Application handlers register with the presentation
/// layer; anything unmapped renders the not-found page.
async fn dispatch(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    if uri.path() == "/" {
        Html(render_index(&state)).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Html(render_not_found(&state, uri.path())),
        )
            .into_response()
    }
}

fn render_index(state: &AppState) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n\
         <h1>{}</h1>\n<p>Active profile: {}</p>\n</body>\n</html>\n",
        state.web.title, state.web.welcome, state.profile
    )
}

fn render_not_found(state: &AppState, path: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n\
         <h1>Not Found</h1>\n<p>No handler mapped for {}</p>\n</body>\n</html>\n",
        state.web.title, path
    )
}

async fn force_encoding(filter: EncodingFilter, mut request: Request, next: Next) -> Response {
    filter.apply_to(request.headers_mut());
    let mut response = next.run(request).await;
    filter.apply_to(response.headers_mut());
    response
}
