//! Best-effort connectivity detection.

use std::net::UdpSocket;

/// Answers whether outbound network access currently looks usable.
///
/// The answer is a hint. False positives and negatives are acceptable;
/// callers must still handle real fetch failures on their own.
pub trait ConnectivityProbe: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Probe backed by the operating system's routing state.
///
/// Connecting a UDP socket performs a route lookup without sending any
/// datagram, so the check stays local and completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl ConnectivityProbe for SystemProbe {
    fn is_available(&self) -> bool {
        let Ok(socket) = UdpSocket::bind(("0.0.0.0", 0)) else {
            return false;
        };
        socket.connect(("8.8.8.8", 53)).is_ok()
    }
}

/// Probe with a fixed answer, for tests and hosts that track connectivity
/// themselves.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl ConnectivityProbe for StaticProbe {
    fn is_available(&self) -> bool {
        self.0
    }
}
