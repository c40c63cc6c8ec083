//! The two ways in: direct flags, or the interactive menu.

use std::{io, path::PathBuf, sync::Arc};
use tracing::{error, info};

use crate::{
    cli::{Arguments, MenuChoice},
    config::LauncherConfig,
    display::{self, xserver},
    error::LaunchError,
    host::Host,
    image::ImageResolver,
    install,
    launch::{Browser, Mode, Orchestrator, SystemBrowser},
    platform::PlatformKind,
    ports,
    prompt::Prompt,
    runtime::Runtime,
    workspace,
};

pub struct App<R: Runtime, H: Host, P: Prompt> {
    config: LauncherConfig,
    runtime: R,
    host: H,
    prompt: P,
    browser: Arc<dyn Browser>,
    port_free: fn(u16) -> bool,
}

impl<R: Runtime, H: Host, P: Prompt> App<R, H, P> {
    pub fn new(config: LauncherConfig, runtime: R, host: H, prompt: P) -> Self {
        Self {
            config,
            runtime,
            host,
            prompt,
            browser: Arc::new(SystemBrowser),
            port_free: ports::bind_probe,
        }
    }

    pub fn with_browser(mut self, browser: Arc<dyn Browser>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_port_probe(mut self, port_free: fn(u16) -> bool) -> Self {
        self.port_free = port_free;
        self
    }

    /// Any error here means exit code 1
    pub fn run_direct(&mut self, args: &Arguments) -> Result<i32, LaunchError> {
        let platform = PlatformKind::detect(&self.host);

        if !self.runtime.available() {
            error!("{} not running", self.runtime.name());
            if platform == PlatformKind::Windows {
                self.offer_runtime_install()?;
            }
            return Err(self.runtime_unavailable());
        }

        let workspace = self.workspace()?;

        let resolver = ImageResolver::new(&self.runtime, &self.config);
        if args.pull {
            resolver.pull()?;
        }
        let image = resolver.resolve(args.build)?;

        let mode = if args.shell {
            Mode::Shell
        } else if args.x11 {
            self.x11_mode(platform)?
        } else {
            Mode::Vnc
        };

        self.orchestrator().launch(&mode, &image, &workspace)
    }

    /// Loops until something gets launched or the user leaves.
    /// Failures are reported and lead back to the menu.
    pub fn run_menu(&mut self) -> Result<i32, LaunchError> {
        loop {
            let platform = PlatformKind::detect(&self.host);
            show_menu(platform);

            let Some(choice) = self.prompt.line("Choice: ")? else {
                info!("Cancelled");
                return Ok(0);
            };

            let choice = match choice.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => {
                    info!("Bye!");
                    return Ok(0);
                }
                Ok(choice) => choice,
                Err(_) => {
                    error!("Invalid choice");
                    self.prompt.pause()?;
                    continue;
                }
            };

            println!();
            if !self.runtime.available() {
                if platform == PlatformKind::Windows {
                    error!("{} not running or not installed", self.runtime.name());
                    if self.offer_runtime_install()? {
                        return Ok(0);
                    }
                } else {
                    error!(
                        "{} not running. Start Docker Desktop first.",
                        self.runtime.name()
                    );
                }
                self.prompt.pause()?;
                continue;
            }
            info!("{} ready", self.runtime.name());

            match self.menu_action(choice, platform) {
                Ok(Some(code)) => return Ok(code),
                Ok(None) => {}
                // the resolver already said what went wrong
                Err(
                    LaunchError::PullFailed(_)
                    | LaunchError::BuildFailed(_)
                    | LaunchError::RecipeMissing(_),
                ) => {}
                Err(e) => error!("{}", e),
            }
            self.prompt.pause()?;
        }
    }

    /// `Some(code)` once a container ran
    fn menu_action(
        &mut self,
        choice: MenuChoice,
        platform: PlatformKind,
    ) -> Result<Option<i32>, LaunchError> {
        let workspace = self.workspace()?;

        let resolver = ImageResolver::new(&self.runtime, &self.config);
        let image = match choice {
            MenuChoice::UpdateImage => {
                resolver.pull()?;
                return Ok(None);
            }
            MenuChoice::Build => {
                resolver.build()?;
                return Ok(None);
            }
            MenuChoice::Vnc | MenuChoice::X11 => resolver.resolve(false)?,
            MenuChoice::Exit => return Ok(None),
        };

        let mode = match choice {
            MenuChoice::X11 => self.x11_mode(platform)?,
            _ => Mode::Vnc,
        };

        self.orchestrator()
            .launch(&mode, &image, &workspace)
            .map(Some)
    }

    fn x11_mode(&mut self, platform: PlatformKind) -> Result<Mode, LaunchError> {
        if platform == PlatformKind::Windows {
            xserver::ensure_running(&self.host, &mut self.prompt, &self.config)?;
        }
        Ok(Mode::X11(display::resolve(&self.host, platform)))
    }

    fn workspace(&self) -> Result<PathBuf, LaunchError> {
        let home = self.host.home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no home directory")
        })?;
        let workspace = workspace::ensure(&home, &self.config.workspace_dir)?;
        info!("Workspace: {}", workspace.display());
        Ok(workspace)
    }

    fn orchestrator(&self) -> Orchestrator<'_, R> {
        Orchestrator::new(&self.runtime, &self.config)
            .with_browser(Arc::clone(&self.browser))
            .with_port_probe(self.port_free)
    }

    fn offer_runtime_install(&mut self) -> io::Result<bool> {
        info!("Docker not found. Trying to install with winget...");
        let installed = install::offer(&self.host, &mut self.prompt, install::DOCKER_DESKTOP)?;
        if installed {
            info!("Please restart your computer.");
            self.prompt.pause()?;
        }
        Ok(installed)
    }

    fn runtime_unavailable(&self) -> LaunchError {
        LaunchError::EnvironmentUnavailable {
            runtime: self.runtime.name().to_string(),
        }
    }
}

fn show_menu(platform: PlatformKind) {
    println!();
    println!("  eSim Docker Launcher");
    println!();
    println!("  OS: {}", platform.to_string().to_uppercase());
    println!();
    println!("  1. Launch VNC Mode (Browser)");
    println!("  2. Launch X11 Mode (Native Window)");
    println!("  3. Update Image");
    println!("  4. Build from Source");
    println!("  0. Exit");
    println!();
}
