use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::{Error, Result};

/// Upper bound for a single `hostapd_cli` invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read-only access to the hostapd control interface.
pub trait ControlInterface {
    /// Runs `command` against the control interface, optionally scoped to `interface`.
    ///
    /// Returns the raw textual response.
    fn query(
        &self,
        command: &str,
        interface: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Queries hostapd by invoking its companion CLI as
/// `<cli> -p <ctrl_dir> [-i <interface>] <command>`.
#[derive(Debug, Clone)]
pub struct ControlClient {
    cli: PathBuf,
    ctrl_dir: PathBuf,
    timeout: Duration,
}

impl ControlClient {
    /// Creates a client using the [`DEFAULT_TIMEOUT`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use hostapd_exporter::hostapd::ControlClient;
    /// let client = ControlClient::new("hostapd_cli", "/run/hostapd");
    /// assert_eq!(client.ctrl_dir().to_str(), Some("/run/hostapd"));
    /// ```
    pub fn new(cli: impl Into<PathBuf>, ctrl_dir: impl Into<PathBuf>) -> Self {
        Self {
            cli: cli.into(),
            ctrl_dir: ctrl_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn ctrl_dir(&self) -> &Path {
        &self.ctrl_dir
    }

    fn command(&self, command: &str, interface: Option<&str>) -> Command {
        let mut cmd = Command::new(&self.cli);
        cmd.arg("-p").arg(&self.ctrl_dir);
        if let Some(interface) = interface {
            cmd.arg("-i").arg(interface);
        }
        cmd.arg(command).stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }
}

impl ControlInterface for ControlClient {
    async fn query(&self, command: &str, interface: Option<&str>) -> Result<String> {
        log::trace!(
            "Running `{} {}` on interface {:?}",
            self.cli.display(),
            command,
            interface
        );
        let output = tokio::time::timeout(self.timeout, self.command(command, interface).output())
            .await
            .map_err(|_| Error::Timeout {
                cli: self.cli.clone(),
                command: command.to_owned(),
                timeout: self.timeout,
            })?
            .map_err(|source| Error::Spawn {
                cli: self.cli.clone(),
                command: command.to_owned(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::Exit {
                cli: self.cli.clone(),
                command: command.to_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
