//! # Launching
//!
//! Activation of modes and the collaborators that touch the OS.
//!
//! [`Activator`] only decides *where* each entry goes; the actual work is
//! done through two capabilities:
//!
//! - [`UrlOpener`] - hands a URL to a browser ([`SystemUrlOpener`])
//! - [`ProcessSpawner`] - starts a detached shell process ([`ShellSpawner`])
//!
//! Tests substitute fakes for both.

mod activator;
mod system;

use std::io;

use thiserror::Error;

pub use activator::{ActivationReport, Activator, LaunchError};
pub use system::{ShellSpawner, SystemUrlOpener};

/// Why a single entry could not be launched
#[derive(Debug, Error)]
pub enum LaunchFailure {
    #[error("Failed to open URL: {0}")]
    Open(io::Error),

    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: io::Error },

    #[error("No shell configured to run commands")]
    NoShell,
}

/// Opens URLs in a browser
pub trait UrlOpener {
    fn open(&self, url: &str) -> Result<(), LaunchFailure>;
}

/// Starts command lines as detached processes
///
/// Implementations return once the process is started and never wait for it
/// to exit.
pub trait ProcessSpawner {
    fn spawn(&self, command_line: &str) -> Result<(), LaunchFailure>;
}

impl<T: UrlOpener + ?Sized> UrlOpener for &T {
    fn open(&self, url: &str) -> Result<(), LaunchFailure> {
        (**self).open(url)
    }
}

impl<T: ProcessSpawner + ?Sized> ProcessSpawner for &T {
    fn spawn(&self, command_line: &str) -> Result<(), LaunchFailure> {
        (**self).spawn(command_line)
    }
}
