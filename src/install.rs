//! Package-manager installs offered on Windows.

use std::io;
use tracing::{error, info, warn};

use crate::{host::Host, prompt::Prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    /// winget id
    pub id: &'static str,
    pub manual_url: &'static str,
}

pub const DOCKER_DESKTOP: Package = Package {
    name: "Docker Desktop",
    id: "Docker.DockerDesktop",
    manual_url: "https://docker.com/products/docker-desktop",
};

pub const VCXSRV: Package = Package {
    name: "VcXsrv",
    id: "marha.VcXsrv",
    manual_url: "https://sourceforge.net/projects/vcxsrv/",
};

/// Asks first, then runs winget. `Ok(false)` when declined or the install failed.
pub fn offer<H: Host, P: Prompt>(host: &H, prompt: &mut P, package: Package) -> io::Result<bool> {
    if !prompt.confirm(&format!("Install {}?", package.name))? {
        warn!("Skipped {} installation", package.name);
        return Ok(false);
    }

    let installed = host
        .status(
            "winget",
            &["install", "-e", "--id", package.id, "--accept-source-agreements"],
        )
        .unwrap_or(false);

    if installed {
        info!("{} installed!", package.name);
    } else {
        error!("Install failed");
        info!("Download manually: {}", package.manual_url);
    }

    Ok(installed)
}
