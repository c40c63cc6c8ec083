pub mod docker;

use std::{io, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("could not start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}", exit_label(.code))]
    Status { command: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => String::from("a signal"),
    }
}

/// Everything needed for one foreground `run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub name: String,
    pub flags: Vec<String>,
    pub image: String,
    pub command: Vec<String>,
}

impl RunSpec {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            image: image.into(),
            command: Vec::new(),
        }
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn env(self, key: &str, value: &str) -> Self {
        self.flag("-e").flag(format!("{key}={value}"))
    }

    /// Read-write bind mount
    pub fn volume(self, host: &Path, container: &str) -> Self {
        self.flag("-v")
            .flag(format!("{}:{}:rw", host.display(), container))
    }

    pub fn publish(self, host: u16, container: u16) -> Self {
        self.flag("-p").flag(format!("{host}:{container}"))
    }

    pub fn command<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command.extend(args.into_iter().map(Into::into));
        self
    }

    /// `run --rm -it --name <name> <flags..> <image> <command..>`
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["run", "--rm", "-it", "--name", self.name.as_str()]
            .into_iter()
            .map(String::from)
            .collect();
        args.extend(self.flags.iter().cloned());
        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}

/// - The engine that stores images and runs containers
/// - Only ever driven through these calls
pub trait Runtime {
    /// Binary name, for messages
    fn name(&self) -> &str;
    /// Installed and the daemon answers
    fn available(&self) -> bool;
    /// Already in local image storage, no network involved
    fn image_exists(&self, image: &str) -> bool;
    fn pull(&self, image: &str) -> Result<(), RuntimeError>;
    fn build(&self, tag: &str, context: &Path) -> Result<(), RuntimeError>;
    /// Force-removes the named container, a missing one is fine
    fn remove(&self, name: &str) -> Result<(), RuntimeError>;
    /// Blocks until the container exits, returns its exit code
    fn run(&self, spec: &RunSpec) -> Result<i32, RuntimeError>;
}
