use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Duration,
};
use tracing::debug;

use super::{Captured, Host};

/// The machine we are actually running on
#[derive(Debug, Default, Clone, Copy)]
pub struct Native;

impl Host for Native {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }

    fn output(&self, program: &str, args: &[&str]) -> io::Result<Captured> {
        debug!("{} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(Captured {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    fn status(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        debug!("{} {:?}", program, args);

        let status = Command::new(program).args(args).status()?;
        Ok(status.success())
    }

    fn spawn_detached(&self, program: &Path, args: &[&str]) -> io::Result<()> {
        debug!("{} {:?} (detached)", program.display(), args);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const DETACHED_PROCESS: u32 = 0x0000_0008;
            cmd.creation_flags(DETACHED_PROCESS);
        }

        // the child outlives us, nothing waits on it
        cmd.spawn()?;
        Ok(())
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
