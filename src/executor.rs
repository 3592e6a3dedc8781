use crate::{Error, Result};
use log::info;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Host facility that starts a shortcut's command.
pub trait Launcher {
    fn launch(&self, command: &str) -> Result<()>;
}

/// Runs commands through a shell, detached from our stdio.
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: String,
}

impl ShellLauncher {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }

    fn command(&self, line: &str) -> Command {
        let mut command = Command::new(&self.shell);
        if self.shell.eq_ignore_ascii_case("cmd") || self.shell.to_ascii_lowercase().ends_with("cmd.exe") {
            command.args(["/C", line]);
        } else {
            command.arg("-c").arg(line);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new(if cfg!(windows) { "cmd" } else { "sh" })
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Err(Error::Validation("nothing to launch".to_string()));
        }
        info!("Launching application: {}", line);
        self.command(line)
            .spawn()
            .map_err(|e| Error::io(format!("Failed to launch '{}'", line), None, e))?;
        Ok(())
    }
}

/// Drops activations that arrive within `cooldown` of the last accepted one.
#[derive(Debug, Clone)]
pub struct LaunchGate {
    cooldown: Duration,
    last: Option<Instant>,
}

impl LaunchGate {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown, last: None }
    }

    pub fn try_enter(&mut self) -> bool {
        self.try_enter_at(Instant::now())
    }

    pub fn try_enter_at(&mut self, now: Instant) -> bool {
        if self.is_cooling_at(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    pub fn is_cooling(&self) -> bool {
        self.is_cooling_at(Instant::now())
    }

    pub fn is_cooling_at(&self, now: Instant) -> bool {
        self.last
            .is_some_and(|last| now.saturating_duration_since(last) < self.cooldown)
    }
}
