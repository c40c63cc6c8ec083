//! In-memory stand-ins for the host, the runtime and the terminal.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet, VecDeque},
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    host::{Captured, Host},
    prompt::Prompt,
    runtime::{RunSpec, Runtime, RuntimeError},
};

#[derive(Debug, Default)]
pub struct FakeHost {
    os: String,
    home: Option<PathBuf>,
    vars: HashMap<String, String>,
    paths: HashSet<PathBuf>,
    files: HashMap<PathBuf, String>,
    outputs: HashMap<String, String>,
    failing: HashSet<String>,
    commands: RefCell<Vec<String>>,
    spawned: RefCell<Vec<String>>,
    written: RefCell<HashMap<PathBuf, String>>,
    slept: RefCell<Vec<Duration>>,
}

impl FakeHost {
    pub fn new(os: &str) -> Self {
        Self {
            os: os.to_string(),
            ..Default::default()
        }
    }

    pub fn with_home(mut self, home: &Path) -> Self {
        self.home = Some(home.to_path_buf());
        self
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_string());
        self.with_path(path)
    }

    /// Stdout for every captured run of `program`
    pub fn with_output(mut self, program: &str, stdout: &str) -> Self {
        self.outputs.insert(program.to_string(), stdout.to_string());
        self
    }

    /// `program` is not installed
    pub fn failing_command(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    pub fn spawned(&self) -> Vec<String> {
        self.spawned.borrow().clone()
    }

    pub fn written(&self, path: &Path) -> Option<String> {
        self.written.borrow().get(path).cloned()
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> io::Result<()> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.commands.borrow_mut().push(line);

        if self.failing.contains(program) {
            return Err(io::Error::new(io::ErrorKind::NotFound, program.to_string()));
        }
        Ok(())
    }
}

impl Host for FakeHost {
    fn os(&self) -> &str {
        &self.os
    }

    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.written
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn temp_dir(&self) -> PathBuf {
        PathBuf::from("/fake/tmp")
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn output(&self, program: &str, args: &[&str]) -> io::Result<Captured> {
        self.record(program, args)?;
        Ok(Captured {
            success: true,
            stdout: self.outputs.get(program).cloned().unwrap_or_default(),
        })
    }

    fn status(&self, program: &str, args: &[&str]) -> io::Result<bool> {
        self.record(program, args)?;
        Ok(true)
    }

    fn spawn_detached(&self, program: &Path, args: &[&str]) -> io::Result<()> {
        let mut line = program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.spawned.borrow_mut().push(line);
        Ok(())
    }

    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Available,
    ImageExists(String),
    Pull(String),
    Build(String),
    Remove(String),
    Run(RunSpec),
}

/// Records every call, in order
#[derive(Debug)]
pub struct FakeRuntime {
    available: bool,
    images: HashSet<String>,
    pull_ok: bool,
    build_ok: bool,
    remove_fails: bool,
    exit_code: i32,
    calls: RefCell<Vec<Call>>,
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self {
            available: true,
            images: HashSet::new(),
            pull_ok: true,
            build_ok: true,
            remove_fails: false,
            exit_code: 0,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeRuntime {
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.images.insert(image.to_string());
        self
    }

    pub fn pull_ok(mut self, ok: bool) -> Self {
        self.pull_ok = ok;
        self
    }

    pub fn build_ok(mut self, ok: bool) -> Self {
        self.build_ok = ok;
        self
    }

    pub fn remove_fails(mut self) -> Self {
        self.remove_fails = true;
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn result(&self, ok: bool, command: &str) -> Result<(), RuntimeError> {
        if ok {
            Ok(())
        } else {
            Err(RuntimeError::Status {
                command: command.to_string(),
                code: Some(1),
            })
        }
    }
}

impl Runtime for FakeRuntime {
    fn name(&self) -> &str {
        "docker"
    }

    fn available(&self) -> bool {
        self.record(Call::Available);
        self.available
    }

    fn image_exists(&self, image: &str) -> bool {
        self.record(Call::ImageExists(image.to_string()));
        self.images.contains(image)
    }

    fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        self.record(Call::Pull(image.to_string()));
        self.result(self.pull_ok, "docker pull")
    }

    fn build(&self, tag: &str, _context: &Path) -> Result<(), RuntimeError> {
        self.record(Call::Build(tag.to_string()));
        self.result(self.build_ok, "docker build")
    }

    fn remove(&self, name: &str) -> Result<(), RuntimeError> {
        self.record(Call::Remove(name.to_string()));
        if self.remove_fails {
            return Err(RuntimeError::Spawn {
                command: String::from("docker rm -f"),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(())
    }

    fn run(&self, spec: &RunSpec) -> Result<i32, RuntimeError> {
        self.record(Call::Run(spec.clone()));
        Ok(self.exit_code)
    }
}

/// Answers questions from a script; runs dry as end of input
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl Prompt for ScriptedPrompt {
    fn line(&mut self, question: &str) -> io::Result<Option<String>> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front())
    }
}
