//! Host network link
//!
//! A desktop host is already on a network, so "joining" only means finding
//! the local address the OS would use to reach the outside world.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

use glyphcast_core::Connectivity;
use log::{debug, info};

/// Address used to pick the outbound interface; no packet is sent to it
pub const DEFAULT_PROBE: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9);

/// [`Connectivity`] for a host whose link is managed by the OS
#[derive(Debug, Clone, Copy)]
pub struct HostLink {
    probe: SocketAddr,
}

impl Default for HostLink {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLink {
    pub const fn new() -> Self {
        Self::with_probe(DEFAULT_PROBE)
    }

    /// Route lookups toward `probe` instead of the documentation range
    pub const fn with_probe(probe: SocketAddr) -> Self {
        Self { probe }
    }

    fn local_address(&self) -> Option<Ipv4Addr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
        socket.connect(self.probe).ok()?;
        match socket.local_addr().ok()?.ip() {
            IpAddr::V4(addr) if !addr.is_unspecified() => Some(addr),
            _ => None,
        }
    }
}

impl Connectivity for HostLink {
    fn address(&self) -> Option<Ipv4Addr> {
        self.local_address()
    }

    fn connect(&mut self, ssid: &str, _password: &str, _timeout_s: u32) -> Option<Ipv4Addr> {
        debug!("host link ignores ssid {:?}", ssid);
        let addr = self.local_address();
        if let Some(addr) = addr {
            info!("host address {}", addr);
        }
        addr
    }
}
