//! Launcher settings.
//!
//! Built once at startup and passed by reference into every component.
//! All keys can be overridden from an optional TOML file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Env var pointing at an alternative config file
pub const CONFIG_ENV: &str = "ESIM_LAUNCHER_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Container runtime binary
    pub runtime: String,
    /// Published image, pulled from the registry
    pub remote_image: String,
    /// Tag given to images built from the local recipe
    pub local_image: String,
    /// There is only ever one container with this name
    pub container_name: String,
    /// Folder name under the user's home directory
    pub workspace_dir: String,
    /// Where the workspace shows up inside the container
    pub container_workspace: String,
    /// Directory holding the `Dockerfile`
    pub recipe_dir: PathBuf,
    pub shm_size: String,
    pub vnc: VncConfig,
    /// Grace period after starting the X server on Windows
    pub xserver_startup_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VncConfig {
    /// noVNC web port, both inside the container and the first host port tried
    pub web_port: u16,
    /// Raw RFB port, same deal
    pub rfb_port: u16,
    pub port_tries: u16,
    pub browser_delay_secs: u64,
}

impl Default for VncConfig {
    fn default() -> Self {
        Self {
            web_port: 6080,
            rfb_port: 5901,
            port_tries: 20,
            browser_delay_secs: 3,
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            runtime: String::from("docker"),
            remote_image: String::from("ghcr.io/barun-2005/esim-docker:latest"),
            local_image: String::from("esim:latest"),
            container_name: String::from("esim-container"),
            workspace_dir: String::from("eSim_Workspace"),
            container_workspace: String::from("/home/esim-user/eSim-Workspace"),
            recipe_dir: default_recipe_dir(),
            shm_size: String::from("256m"),
            vnc: VncConfig::default(),
            xserver_startup_secs: 2,
        }
    }
}

/// The recipe ships next to the executable
fn default_recipe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl LauncherConfig {
    /// Loads overrides from `$ESIM_LAUNCHER_CONFIG` or the platform config dir.
    /// A missing file just means defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("in", "fossee", "esim-launcher")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn recipe_path(&self) -> PathBuf {
        self.recipe_dir.join("Dockerfile")
    }
}
