//! OS-backed launch collaborators

use std::process::{Command, Stdio};
use std::thread;

use super::{LaunchFailure, ProcessSpawner, UrlOpener};

/// Opens URLs with the system default handler or a configured browser
///
/// The handler is started detached, so a browser that stays in the
/// foreground does not hold up the rest of the mode.
#[derive(Debug, Clone, Default)]
pub struct SystemUrlOpener {
    browser: Option<String>,
}

impl SystemUrlOpener {
    pub fn new(browser: Option<String>) -> Self {
        Self { browser }
    }
}

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) -> Result<(), LaunchFailure> {
        let result = match &self.browser {
            Some(browser) => open::with_detached(url, browser.as_str()),
            None => open::that_detached(url),
        };
        result.map_err(LaunchFailure::Open)
    }
}

/// Runs command lines through a shell, e.g. `sh -c <line>`
#[derive(Debug, Clone)]
pub struct ShellSpawner {
    shell: Vec<String>,
}

impl ShellSpawner {
    /// `shell` is the program followed by the arguments that precede the
    /// command line
    pub fn new(shell: Vec<String>) -> Self {
        Self { shell }
    }
}

impl ProcessSpawner for ShellSpawner {
    fn spawn(&self, command_line: &str) -> Result<(), LaunchFailure> {
        let (program, args) = self.shell.split_first().ok_or(LaunchFailure::NoShell)?;

        let mut command = Command::new(program);
        command.args(args);
        push_command_line(&mut command, command_line);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut command);

        let mut child = command.spawn().map_err(|error| LaunchFailure::Spawn {
            program: program.clone(),
            error,
        })?;
        tracing::debug!(pid = child.id(), command = command_line, "spawned process");

        // Reap in the background so long-lived hosts don't collect zombies
        thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(())
    }
}

/// Appends the command line for the shell to parse
#[cfg(not(windows))]
fn push_command_line(command: &mut Command, command_line: &str) {
    command.arg(command_line);
}

/// `cmd /C` reads the rest of its command line verbatim and does not
/// understand the `\"` escapes `Command::arg` would add.
#[cfg(windows)]
fn push_command_line(command: &mut Command, command_line: &str) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(command_line);
}

/// Keeps the child out of the terminal's process group so it outlives us
#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    command.creation_flags(DETACHED_PROCESS);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}
