//! TCP liveness prober.
//!
//! Performs a plain TCP connect with a short deadline. This rejects
//! addresses with nothing listening before the scanner pays for a Modbus
//! handshake. No bytes are exchanged; the stream is dropped as soon as the
//! connection is established.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::Prober;
use crate::types::ScanTarget;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Default probe deadline.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(100);

/// TCP connect prober.
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> ScanResult<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(ScanError::Connect {
                addr,
                reason: e.to_string(),
            }),
            Err(_) => Err(ScanError::ConnectTimeout {
                addr,
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn is_reachable(&self, target: ScanTarget) -> bool {
        match self.attempt_connect(target.socket_addr()).await {
            Ok(stream) => {
                drop(stream);
                true
            }
            Err(e) => {
                debug!(%target, error = %e, "probe failed");
                false
            }
        }
    }
}
