//! Scan target and local subnet types.

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// Standard Modbus/TCP port.
pub const MODBUS_PORT: u16 = 502;

/// A single candidate device: an IPv4 address and the port its Modbus
/// endpoint is expected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl ScanTarget {
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip, self.port))
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// A /24 subnet swept by varying the last octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    network: Ipv4Network,
}

impl Subnet {
    pub const PREFIX: u8 = 24;

    /// The /24 containing `addr`.
    pub fn containing(addr: Ipv4Addr) -> Self {
        let [a, b, c, _] = addr.octets();
        let base = Ipv4Addr::new(a, b, c, 0);
        // A /24 prefix is always valid.
        let network = Ipv4Network::new(base, Self::PREFIX)
            .unwrap_or_else(|_| Ipv4Network::from(base));
        Self { network }
    }

    /// Network address (last octet zero).
    pub fn network(&self) -> Ipv4Addr {
        self.network.network()
    }

    /// Address with the last octet replaced.
    pub fn host(&self, octet: u8) -> Ipv4Addr {
        let [a, b, c, _] = self.network().octets();
        Ipv4Addr::new(a, b, c, octet)
    }

    /// First three octets, e.g. `192.168.1`.
    pub fn prefix(&self) -> String {
        let [a, b, c, _] = self.network().octets();
        format!("{a}.{b}.{c}")
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.X", self.prefix())
    }
}

impl Serialize for Subnet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_socket_addr() {
        let target = ScanTarget::new(Ipv4Addr::new(192, 168, 1, 20), MODBUS_PORT);
        assert_eq!(target.socket_addr().to_string(), "192.168.1.20:502");
        assert_eq!(target.to_string(), "192.168.1.20:502");
    }

    #[test]
    fn test_subnet_host_replaces_last_octet() {
        let subnet = Subnet::containing(Ipv4Addr::new(10, 1, 2, 77));
        assert_eq!(subnet.network(), Ipv4Addr::new(10, 1, 2, 0));
        assert_eq!(subnet.host(200), Ipv4Addr::new(10, 1, 2, 200));
        assert_eq!(subnet.host(255), Ipv4Addr::new(10, 1, 2, 255));
    }

    #[test]
    fn test_subnet_display() {
        let subnet = Subnet::containing(Ipv4Addr::new(192, 168, 0, 14));
        assert_eq!(subnet.to_string(), "192.168.0.X");
        assert_eq!(subnet.prefix(), "192.168.0");
    }

    #[test]
    fn test_subnet_serializes_as_cidr() {
        let subnet = Subnet::containing(Ipv4Addr::new(192, 168, 0, 14));
        assert_eq!(serde_json::to_string(&subnet).unwrap(), "\"192.168.0.0/24\"");
    }
}
