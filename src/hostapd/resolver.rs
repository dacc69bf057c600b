use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::{Error, Result};

/// How long a resolved interface is trusted before the control directory is listed again.
pub const RESOLVE_INTERVAL: Duration = Duration::from_secs(60);

/// Lists the interface control sockets in `ctrl_dir`, sorted by name.
///
/// A missing directory is treated like an empty one. Hidden entries are skipped.
///
/// # Errors
///
/// Returns [`Error::ReadDir`] if the directory exists but cannot be listed.
pub fn list_interfaces(ctrl_dir: impl AsRef<Path>) -> Result<Vec<String>> {
    let ctrl_dir = ctrl_dir.as_ref();
    let read_dir_error = |source: std::io::Error| Error::ReadDir {
        path: ctrl_dir.to_path_buf(),
        source,
    };

    let entries = match std::fs::read_dir(ctrl_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(read_dir_error(err)),
    };

    let mut interfaces = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_dir_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            interfaces.push(name);
        }
    }
    interfaces.sort();

    Ok(interfaces)
}

/// Picks the interface to monitor from `ctrl_dir`.
///
/// Returns `None` if the directory is missing, empty or unreadable. Failures are
/// logged as warnings.
pub fn resolve(ctrl_dir: impl AsRef<Path>) -> Option<String> {
    match list_interfaces(ctrl_dir) {
        Ok(interfaces) => interfaces.into_iter().next(),
        Err(err) => {
            log::warn!("Interface discovery failed: {}", err);
            None
        }
    }
}

/// The interface currently being monitored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedInterface {
    name: String,
    resolved_at: Instant,
}

impl ManagedInterface {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time of the last successful resolution.
    pub fn resolved_at(&self) -> Instant {
        self.resolved_at
    }
}

/// Keeps track of the monitored interface and periodically re-discovers it,
/// so that a hostapd restart with a different interface name is picked up.
#[derive(Debug)]
pub struct InterfaceResolver {
    ctrl_dir: PathBuf,
    interval: Duration,
    current: Option<ManagedInterface>,
}

impl InterfaceResolver {
    pub fn new(ctrl_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctrl_dir: ctrl_dir.into(),
            interval: RESOLVE_INTERVAL,
            current: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn is_stale(&self, now: Instant) -> bool {
        match &self.current {
            None => true,
            Some(iface) => now.saturating_duration_since(iface.resolved_at) > self.interval,
        }
    }

    /// Returns the interface to query at `now`, re-resolving it if none is known
    /// or the last successful resolution is older than the interval.
    ///
    /// If re-resolution finds nothing, the previously known interface is kept and
    /// resolution is retried on the next call.
    pub fn current(&mut self, now: Instant) -> Option<&str> {
        if self.is_stale(now) {
            match resolve(&self.ctrl_dir) {
                Some(name) => {
                    if self.current.as_ref().map(ManagedInterface::name) != Some(name.as_str()) {
                        log::info!("Monitoring hostapd interface `{}`", name);
                    }
                    self.current = Some(ManagedInterface {
                        name,
                        resolved_at: now,
                    });
                }
                None => match &self.current {
                    Some(iface) => log::warn!(
                        "No hostapd interface found in `{}`, keeping `{}`",
                        self.ctrl_dir.display(),
                        iface.name
                    ),
                    None => log::warn!(
                        "No hostapd interface found in `{}`",
                        self.ctrl_dir.display()
                    ),
                },
            }
        }

        self.current.as_ref().map(ManagedInterface::name)
    }

    pub fn managed(&self) -> Option<&ManagedInterface> {
        self.current.as_ref()
    }
}
