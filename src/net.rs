//! Local subnet detection.
//!
//! The subnet to sweep is the /24 around this host's outbound IPv4 address.
//! That address is found by "connecting" a UDP socket to a public address,
//! which selects a route without sending any packets.

use crate::error::{ScanError, ScanResult};
use crate::types::Subnet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Address used only for route selection.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// Where the scan's base address comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseAddress {
    /// Use this address's /24.
    Fixed(Ipv4Addr),
    /// Detect the local outbound address at resolve time.
    Detect,
}

impl BaseAddress {
    pub fn from_option(addr: Option<Ipv4Addr>) -> Self {
        addr.map_or(Self::Detect, Self::Fixed)
    }

    /// Resolve to the subnet to scan.
    pub async fn resolve(&self) -> ScanResult<Subnet> {
        let addr = match self {
            Self::Fixed(addr) => *addr,
            Self::Detect => local_ipv4().await?,
        };
        Ok(Subnet::containing(addr))
    }
}

/// The IPv4 address this host would use for outbound traffic.
pub async fn local_ipv4() -> ScanResult<Ipv4Addr> {
    let socket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await?;
    socket
        .connect(ROUTE_PROBE_ADDR)
        .await
        .map_err(|e| ScanError::LocalAddress(e.to_string()))?;

    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => {
            debug!(%ip, "detected local address");
            Ok(ip)
        }
        other => Err(ScanError::LocalAddress(format!(
            "no IPv4 route, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_base_skips_detection() {
        let subnet = BaseAddress::Fixed(Ipv4Addr::new(172, 16, 4, 9))
            .resolve()
            .await
            .unwrap();
        assert_eq!(subnet.network(), Ipv4Addr::new(172, 16, 4, 0));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(BaseAddress::from_option(None), BaseAddress::Detect);
        assert_eq!(
            BaseAddress::from_option(Some(Ipv4Addr::LOCALHOST)),
            BaseAddress::Fixed(Ipv4Addr::LOCALHOST)
        );
    }
}
