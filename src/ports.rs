use std::net::TcpListener;

use crate::error::LaunchError;

/// Lowest port in `start..start + tries` that `is_free` accepts.
/// Check-then-bind: another process can still grab it before the container does.
pub fn allocate(
    start: u16,
    tries: u16,
    is_free: impl Fn(u16) -> bool,
) -> Result<u16, LaunchError> {
    (0..tries)
        .filter_map(|offset| start.checked_add(offset))
        .find(|&port| is_free(port))
        .ok_or(LaunchError::ResourceExhausted {
            start,
            end: u32::from(start) + u32::from(tries),
        })
}

/// Free if we can bind it on all interfaces right now
pub fn bind_probe(port: u16) -> bool {
    TcpListener::bind(("0.0.0.0", port)).is_ok()
}
