//! Native-window (X11) plumbing.
//!
//! Every platform maps to one [`Transport`], and every transport to a fixed
//! [`Policy`] row. Resolving is then just filling in the display address.

pub mod xserver;

use std::path::Path;
use tracing::debug;

use crate::{host::Host, platform::PlatformKind};

const X11_SOCKET_DIR: &str = "/tmp/.X11-unix";
const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Where the GUI goes, and the runtime args that get it there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTarget {
    pub address: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Transport {
    Linux,
    /// WSL2 with WSLg
    WslIntegrated,
    /// WSL2 talking to an X server on the Windows side
    WslLegacy,
    Windows,
    MacOs,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// The host's `$DISPLAY`, `:0` when unset
    HostDisplay,
    /// First `nameserver` of resolv.conf (the Windows host), display 0.0
    Nameserver,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub address: Address,
    /// Set after `DISPLAY`, in this order
    pub env: &'static [(&'static str, &'static str)],
    pub mount_x11_socket: bool,
}

impl Transport {
    pub fn select(platform: PlatformKind, integrated_display: bool) -> Self {
        match platform {
            PlatformKind::Linux => Transport::Linux,
            PlatformKind::Wsl2 if integrated_display => Transport::WslIntegrated,
            PlatformKind::Wsl2 => Transport::WslLegacy,
            PlatformKind::Windows => Transport::Windows,
            PlatformKind::MacOs => Transport::MacOs,
            PlatformKind::Other => Transport::Other,
        }
    }

    pub fn policy(self) -> Policy {
        match self {
            Transport::Linux => Policy {
                address: Address::HostDisplay,
                env: &[],
                mount_x11_socket: true,
            },
            Transport::WslIntegrated => Policy {
                address: Address::HostDisplay,
                env: &[("QT_QPA_PLATFORM", "xcb")],
                mount_x11_socket: true,
            },
            Transport::WslLegacy => Policy {
                address: Address::Nameserver,
                env: &[("LIBGL_ALWAYS_INDIRECT", "1")],
                mount_x11_socket: false,
            },
            Transport::Windows => Policy {
                address: Address::Fixed("host.docker.internal:0.0"),
                env: &[
                    ("QT_X11_NO_MITSHM", "1"),
                    ("NO_AT_BRIDGE", "1"),
                    ("GTK_A11Y", "none"),
                ],
                mount_x11_socket: false,
            },
            Transport::MacOs => Policy {
                address: Address::Fixed("host.docker.internal:0"),
                env: &[("LIBGL_ALWAYS_INDIRECT", "1")],
                mount_x11_socket: false,
            },
            Transport::Other => Policy {
                address: Address::Fixed(":0"),
                env: &[],
                mount_x11_socket: false,
            },
        }
    }
}

/// Works out the display for `platform`.
/// On plain linux this also lets local containers talk to the X server.
pub fn resolve<H: Host>(host: &H, platform: PlatformKind) -> DisplayTarget {
    let transport = Transport::select(platform, platform.supports_integrated_display(host));

    if transport == Transport::Linux {
        if let Err(e) = grant_local_access(host) {
            debug!("xhost: {}", e);
        }
    }

    let policy = transport.policy();
    let address = match policy.address {
        Address::HostDisplay => host.var("DISPLAY").unwrap_or_else(|| String::from(":0")),
        Address::Nameserver => format!("{}:0.0", nameserver(host)),
        Address::Fixed(addr) => addr.to_string(),
    };

    let mut args = vec![String::from("-e"), format!("DISPLAY={address}")];
    for (key, value) in policy.env {
        args.push(String::from("-e"));
        args.push(format!("{key}={value}"));
    }
    if policy.mount_x11_socket {
        args.push(String::from("-v"));
        args.push(format!("{X11_SOCKET_DIR}:{X11_SOCKET_DIR}:rw"));
    }

    DisplayTarget { address, args }
}

/// Best effort, it may already be granted or xhost may be missing
fn grant_local_access<H: Host>(host: &H) -> std::io::Result<()> {
    host.output("xhost", &["+local:docker"]).map(|_| ())
}

fn nameserver<H: Host>(host: &H) -> String {
    host.read_file(Path::new(RESOLV_CONF))
        .ok()
        .and_then(|conf| {
            conf.lines()
                .find(|line| line.starts_with("nameserver"))
                .and_then(|line| line.split_whitespace().nth(1))
                .map(String::from)
        })
        .unwrap_or_else(|| String::from("localhost"))
}
