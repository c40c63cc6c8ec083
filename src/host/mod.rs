pub mod native;

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

/// What a captured command left behind
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub success: bool,
    pub stdout: String,
}

/// - Answers questions about the machine we run on
/// - Runs host-side helpers (xhost, tasklist, winget, the X server)
pub trait Host {
    /// Same naming as `std::env::consts::OS`
    fn os(&self) -> &str;
    fn var(&self, key: &str) -> Option<String>;
    fn exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> io::Result<String>;
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
    fn temp_dir(&self) -> PathBuf;
    fn home_dir(&self) -> Option<PathBuf>;
    /// Runs to completion, output captured
    fn output(&self, program: &str, args: &[&str]) -> io::Result<Captured>;
    /// Runs to completion on the user's terminal
    fn status(&self, program: &str, args: &[&str]) -> io::Result<bool>;
    /// Starts a process we never wait for
    fn spawn_detached(&self, program: &Path, args: &[&str]) -> io::Result<()>;
    fn sleep(&self, duration: Duration);
}
