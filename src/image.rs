//! Getting hold of a runnable image: remote, cached, or built here.

use tracing::{error, info, warn};

use crate::{config::LauncherConfig, error::LaunchError, runtime::Runtime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Provenance {
    Remote,
    /// Built on an earlier run, possibly out of date
    LocalCached,
    LocalBuilt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub name: String,
    pub provenance: Provenance,
}

pub struct ImageResolver<'a, R: Runtime> {
    runtime: &'a R,
    config: &'a LauncherConfig,
}

impl<'a, R: Runtime> ImageResolver<'a, R> {
    pub fn new(runtime: &'a R, config: &'a LauncherConfig) -> Self {
        Self { runtime, config }
    }

    /// With `prefer_build` only a local build is tried. Otherwise:
    /// remote already present, pull, previously built image, build.
    pub fn resolve(&self, prefer_build: bool) -> Result<ImageReference, LaunchError> {
        if prefer_build {
            return self.build();
        }

        let remote = &self.config.remote_image;
        if self.runtime.image_exists(remote) {
            return Ok(ImageReference {
                name: remote.clone(),
                provenance: Provenance::Remote,
            });
        }

        if self.pull().is_ok() {
            return Ok(ImageReference {
                name: remote.clone(),
                provenance: Provenance::Remote,
            });
        }

        let local = &self.config.local_image;
        if self.runtime.image_exists(local) {
            warn!("Using local image: {} (may be out of date)", local);
            return Ok(ImageReference {
                name: local.clone(),
                provenance: Provenance::LocalCached,
            });
        }

        warn!("Remote unavailable, trying local build...");
        self.build().map_err(|_| LaunchError::ImageUnavailable)
    }

    pub fn pull(&self) -> Result<(), LaunchError> {
        let image = &self.config.remote_image;
        info!("Pulling {}...", image);
        info!("This may take a few minutes...");

        match self.runtime.pull(image) {
            Ok(()) => {
                info!("Image downloaded!");
                Ok(())
            }
            Err(e) => {
                error!("Pull failed: {}", e);
                Err(LaunchError::PullFailed(e))
            }
        }
    }

    /// Needs the recipe; a missing recipe is its own error, not a build failure
    pub fn build(&self) -> Result<ImageReference, LaunchError> {
        let recipe = self.config.recipe_path();
        if !recipe.exists() {
            error!("Dockerfile not found: {}", recipe.display());
            return Err(LaunchError::RecipeMissing(recipe));
        }

        info!("Building from Dockerfile (this takes 10-15 min)...");
        match self
            .runtime
            .build(&self.config.local_image, &self.config.recipe_dir)
        {
            Ok(()) => {
                info!("Build complete!");
                Ok(ImageReference {
                    name: self.config.local_image.clone(),
                    provenance: Provenance::LocalBuilt,
                })
            }
            Err(e) => {
                error!("Build failed: {}", e);
                Err(LaunchError::BuildFailed(e))
            }
        }
    }
}
