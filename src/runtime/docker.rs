use std::{
    path::Path,
    process::{Command, Stdio},
};
use tracing::debug;

use super::{RunSpec, Runtime, RuntimeError};

/// Drives the docker (or a compatible) CLI
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: String,
}

impl DockerCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.bin, args.join(" "))
    }

    /// Terminal attached, we only care about the exit status
    fn attached(&self, args: &[&str]) -> Result<Option<i32>, RuntimeError> {
        debug!("{}", self.describe(args));

        let status = Command::new(&self.bin)
            .args(args)
            .status()
            .map_err(|source| RuntimeError::Spawn {
                command: self.describe(args),
                source,
            })?;

        Ok(status.code())
    }

    fn checked(&self, args: &[&str]) -> Result<(), RuntimeError> {
        match self.attached(args)? {
            Some(0) => Ok(()),
            code => Err(RuntimeError::Status {
                command: self.describe(args),
                code,
            }),
        }
    }
}

impl Runtime for DockerCli {
    fn name(&self) -> &str {
        &self.bin
    }

    fn available(&self) -> bool {
        Command::new(&self.bin)
            .arg("info")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false) // not on PATH
    }

    fn image_exists(&self, image: &str) -> bool {
        let output = Command::new(&self.bin)
            .args(["images", "-q", image])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                !String::from_utf8_lossy(&output.stdout).trim().is_empty()
            }
            _ => false,
        }
    }

    fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        self.checked(&["pull", image])
    }

    fn build(&self, tag: &str, context: &Path) -> Result<(), RuntimeError> {
        let context = context.to_string_lossy();
        self.checked(&["build", "-t", tag, &*context])
    }

    fn remove(&self, name: &str) -> Result<(), RuntimeError> {
        // exits non-zero when there is nothing to remove, which is fine
        Command::new(&self.bin)
            .args(["rm", "-f", name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| RuntimeError::Spawn {
                command: self.describe(&["rm", "-f", name]),
                source,
            })?;

        Ok(())
    }

    fn run(&self, spec: &RunSpec) -> Result<i32, RuntimeError> {
        let args = spec.to_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        // killed by a signal has no code
        Ok(self.attached(&args)?.unwrap_or(1))
    }
}
