pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod image;
pub mod install;
pub mod launch;
pub mod platform;
pub mod ports;
pub mod prompt;
pub mod runtime;
pub mod workspace;

#[cfg(test)]
mod testing;
