//! Starts the single named container in one of the display modes.

use std::{io, path::Path, sync::Arc, thread, time::Duration};
use tracing::{debug, info};

use crate::{
    config::LauncherConfig,
    display::DisplayTarget,
    error::LaunchError,
    image::ImageReference,
    ports,
    runtime::{RunSpec, Runtime},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Desktop streamed to the browser
    Vnc,
    /// Native windows on the host's display
    X11(DisplayTarget),
    /// Just a shell, no display at all
    Shell,
}

pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Whatever the OS considers the default browser
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}

pub struct Orchestrator<'a, R: Runtime> {
    runtime: &'a R,
    config: &'a LauncherConfig,
    browser: Arc<dyn Browser>,
    port_free: Box<dyn Fn(u16) -> bool + 'a>,
}

impl<'a, R: Runtime> Orchestrator<'a, R> {
    pub fn new(runtime: &'a R, config: &'a LauncherConfig) -> Self {
        Self {
            runtime,
            config,
            browser: Arc::new(SystemBrowser),
            port_free: Box::new(ports::bind_probe),
        }
    }

    pub fn with_browser(mut self, browser: Arc<dyn Browser>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_port_probe(mut self, port_free: impl Fn(u16) -> bool + 'a) -> Self {
        self.port_free = Box::new(port_free);
        self
    }

    /// Replaces any previous container and blocks until the new one exits.
    /// Returns the container's exit code.
    pub fn launch(
        &self,
        mode: &Mode,
        image: &ImageReference,
        workspace: &Path,
    ) -> Result<i32, LaunchError> {
        // there can only be one
        if let Err(e) = self.runtime.remove(&self.config.container_name) {
            debug!("removing old container: {}", e);
        }

        let base = RunSpec::new(&self.config.container_name, &image.name);

        let spec = match mode {
            Mode::Shell => base
                .volume(workspace, &self.config.container_workspace)
                .command(["/bin/bash"]),
            Mode::X11(display) => {
                let spec = self.with_shared_memory(base, workspace).flags(&display.args);

                println!();
                info!("X11 Mode");
                println!("     Display: {}", display.address);
                println!();

                spec
            }
            Mode::Vnc => return self.launch_vnc(base, workspace),
        };

        debug!("{:?}", spec.to_args());
        Ok(self.runtime.run(&spec)?)
    }

    fn with_shared_memory(&self, spec: RunSpec, workspace: &Path) -> RunSpec {
        spec.flag(format!("--shm-size={}", self.config.shm_size))
            .flag("--ipc=host")
            .volume(workspace, &self.config.container_workspace)
    }

    fn launch_vnc(&self, base: RunSpec, workspace: &Path) -> Result<i32, LaunchError> {
        let vnc = &self.config.vnc;
        let web_port = ports::allocate(vnc.web_port, vnc.port_tries, &self.port_free)?;
        let rfb_port = ports::allocate(vnc.rfb_port, vnc.port_tries, &self.port_free)?;

        let spec = self
            .with_shared_memory(base, workspace)
            .publish(web_port, vnc.web_port)
            .publish(rfb_port, vnc.rfb_port)
            .env("USE_VNC", "1")
            .command(["--vnc"]);

        let url = format!("http://localhost:{web_port}/vnc.html");

        println!();
        info!("VNC Mode");
        println!("     Browser: {url}");
        println!("     VNC:     localhost:{rfb_port}");
        println!();
        println!("     Opening browser...");
        println!();

        self.open_later(url);

        debug!("{:?}", spec.to_args());
        Ok(self.runtime.run(&spec)?)
    }

    /// Fire and forget. Never joined; it dies with the process if the
    /// container exits first.
    fn open_later(&self, url: String) {
        let browser = Arc::clone(&self.browser);
        let delay = Duration::from_secs(self.config.vnc.browser_delay_secs);

        thread::spawn(move || {
            thread::sleep(delay);
            if let Err(e) = browser.open(&url) {
                debug!("could not open browser: {}", e);
            }
        });
    }
}
