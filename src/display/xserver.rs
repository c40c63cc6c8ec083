//! VcXsrv, the X server the Windows transport forwards to.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    config::LauncherConfig,
    error::LaunchError,
    host::Host,
    install::{self, VCXSRV},
    prompt::Prompt,
};

const EXE: &str = "vcxsrv.exe";
const CONFIG_FILE: &str = "esim_xserver.xlaunch";

/// Multi-window, clipboard, WGL, no access control
const XLAUNCH_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<XLaunch WindowMode="MultiWindow" ClientMode="NoClient" LocalClient="False" Display="-1" LocalProgram="xcalc" RemoteProgram="xterm" RemotePassword="" PrivateKey="" RemoteHost="" RemoteUser="" XDMCPHost="" XDMCPBroadcast="False" XDMCPIndirect="False" Clipboard="True" ClipboardPrimary="True" ExtraParams="" Wgl="True" DisableAC="True" XDMCPTerminate="False"/>
"#;

fn candidates<H: Host>(host: &H) -> Vec<PathBuf> {
    ["PROGRAMFILES", "PROGRAMFILES(X86)"]
        .into_iter()
        .filter_map(|var| host.var(var))
        .map(|dir| Path::new(&dir).join("VcXsrv").join(EXE))
        .collect()
}

fn find<H: Host>(host: &H) -> Option<PathBuf> {
    candidates(host).into_iter().find(|p| host.exists(p))
}

fn running<H: Host>(host: &H) -> bool {
    host.output("tasklist", &["/FI", "IMAGENAME eq vcxsrv.exe"])
        .map(|out| out.stdout.to_lowercase().contains(EXE))
        .unwrap_or(false)
}

/// Makes sure an X server is up, installing it first if the user agrees
pub fn ensure_running<H: Host, P: Prompt>(
    host: &H,
    prompt: &mut P,
    config: &LauncherConfig,
) -> Result<(), LaunchError> {
    let server = match find(host) {
        Some(server) => server,
        None => {
            info!("VcXsrv not found (needed for X11 mode)");
            if !install::offer(host, prompt, VCXSRV)? {
                return Err(LaunchError::DisplayServerUnavailable(String::from(
                    "VcXsrv is not installed",
                )));
            }
            find(host).ok_or_else(|| {
                LaunchError::DisplayServerUnavailable(String::from(
                    "VcXsrv not found after install",
                ))
            })?
        }
    };

    if running(host) {
        info!("VcXsrv already running");
        return Ok(());
    }

    let config_path = host.temp_dir().join(CONFIG_FILE);
    host.write_file(&config_path, XLAUNCH_CONFIG)?;

    info!("Starting VcXsrv...");
    let xlaunch = server.with_file_name("xlaunch.exe");
    let started = if host.exists(&xlaunch) {
        let config_arg = config_path.to_string_lossy();
        host.spawn_detached(&xlaunch, &["-run", &config_arg])
    } else {
        host.spawn_detached(&server, &[":0", "-multiwindow", "-clipboard", "-wgl", "-ac"])
    };

    if let Err(e) = started {
        warn!("Failed to start VcXsrv: {}", e);
        return Err(LaunchError::DisplayServerUnavailable(e.to_string()));
    }

    host.sleep(Duration::from_secs(config.xserver_startup_secs));
    info!("VcXsrv started");
    Ok(())
}
