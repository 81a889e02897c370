//! Web interface.
//!
//! A form at `/` collects the octet range, `/search` runs one sequential
//! scan per request and renders the results. Concurrent requests run
//! independent scans; they only share the read-only [`AppState`].

mod handlers;
pub mod render;

use crate::config::AppSettings;
use crate::error::{CliError, CliResult};
use crate::net::BaseAddress;
use crate::scanner::SubnetScanner;
use crate::types::OctetRange;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub use handlers::SearchForm;

/// Shared, immutable state handed to every request.
pub struct AppState {
    pub scanner: SubnetScanner,
    pub base: BaseAddress,
    pub defaults: OctetRange,
}

impl AppState {
    pub fn new(scanner: SubnetScanner, base: BaseAddress, defaults: OctetRange) -> Self {
        Self {
            scanner,
            base,
            defaults,
        }
    }

    /// State for the TCP/Modbus scanner described by `settings`.
    pub fn from_settings(settings: &AppSettings) -> CliResult<Self> {
        Ok(Self::new(
            SubnetScanner::from_config(&settings.scan_config()),
            settings.base(),
            settings.default_range()?,
        ))
    }
}

/// Build the router for `/` and `/search`.
pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::show_home_page))
        .route("/search", post(handlers::search))
        .with_state(state)
}

/// HTTP server for the web interface.
pub struct WebServer {
    addr: SocketAddr,
    router: Router,
}

impl WebServer {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self {
            addr,
            router: create_routes(Arc::new(state)),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind and serve until the process exits.
    pub async fn run(self) -> CliResult<()> {
        let listener = TcpListener::bind(self.addr).await.map_err(|e| {
            CliError::Other(format!("failed to bind web interface to {}: {}", self.addr, e))
        })?;

        info!(addr = %self.addr, "web interface listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
