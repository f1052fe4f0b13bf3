//! Network join management

use core::net::Ipv4Addr;

/// Wi-Fi (or other link) management
///
/// The pipeline never reconnects on its own; it only asks once at startup.
pub trait Connectivity {
    /// Current address if the link is already up
    fn address(&self) -> Option<Ipv4Addr>;

    /// Join `ssid`, waiting at most `timeout_s` seconds
    ///
    /// Returns the acquired address, or `None` on failure or timeout.
    fn connect(&mut self, ssid: &str, password: &str, timeout_s: u32) -> Option<Ipv4Addr>;
}
