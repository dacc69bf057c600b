use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Errors that may occur when talking to the hostapd control interface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to run `{cli} {command}`: {source}")]
    Spawn {
        cli: PathBuf,
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{cli} {command}` did not finish within {timeout:?}")]
    Timeout {
        cli: PathBuf,
        command: String,
        timeout: Duration,
    },
    #[error("`{cli} {command}` exited with {status}: {stderr}")]
    Exit {
        cli: PathBuf,
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("failed to list control directory `{path}`: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
