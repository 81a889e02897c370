//! Serve subcommand implementation.
//!
//! Handles `electroscan serve`, the web interface.

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::web::{AppState, WebServer};
use clap::Parser;
use std::net::IpAddr;

/// Run the web interface.
#[derive(Parser, Debug, Default)]
pub struct ServeCommand {
    /// Port to listen on (overrides settings)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind to (overrides settings)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,
}

impl ServeCommand {
    /// Execute the serve command.
    pub async fn execute(&self, settings: &AppSettings) -> CliResult<()> {
        let mut settings = settings.clone();
        if let Some(port) = self.port {
            settings.http_port = port;
        }
        if let Some(bind) = self.bind {
            settings.bind_address = bind;
        }

        let state = AppState::from_settings(&settings)?;
        WebServer::new(settings.listen_addr(), state).run().await
    }
}
