use std::{io, path::PathBuf};

use crate::runtime::RuntimeError;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("{runtime} is not installed or not running")]
    EnvironmentUnavailable { runtime: String },

    #[error("No free port found between {start}-{end}")]
    ResourceExhausted { start: u16, end: u32 },

    #[error("No image available")]
    ImageUnavailable,

    #[error("Build recipe not found: {}", .0.display())]
    RecipeMissing(PathBuf),

    #[error("Build failed")]
    BuildFailed(#[source] RuntimeError),

    #[error("Pull failed")]
    PullFailed(#[source] RuntimeError),

    #[error("X11 server not available: {0}")]
    DisplayServerUnavailable(String),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
