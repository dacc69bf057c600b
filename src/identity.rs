use std::path::Path;

/// Real user ID and supplementary groups of a process, as listed in
/// `/proc/<pid>/status`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessIds {
    pub uid: Option<u32>,
    pub groups: Vec<u32>,
}

impl ProcessIds {
    /// Parses the `Uid:` and `Groups:` lines of a `/proc/<pid>/status` document.
    ///
    /// The first `Uid:` field is the real UID. Unparsable group IDs are skipped.
    pub fn parse(status: &str) -> Self {
        let mut ids = Self::default();
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("Uid:") {
                ids.uid = rest.split_whitespace().next().and_then(|v| v.parse().ok());
            } else if let Some(rest) = line.strip_prefix("Groups:") {
                ids.groups = rest
                    .split_whitespace()
                    .filter_map(|v| v.parse().ok())
                    .collect();
            }
        }
        ids
    }

    pub fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        std::fs::read_to_string(path).map(|status| Self::parse(&status))
    }
}

/// Logs who the exporter runs as. hostapd's control sockets are usually
/// restricted to a group, so the UID and group IDs are included.
pub fn log_identity() {
    let user = std::env::var("USER").unwrap_or_else(|_| "<unknown>".to_owned());
    match ProcessIds::read("/proc/self/status") {
        Ok(ids) => log::info!(
            "Running as user `{}` (uid {}, groups {:?})",
            user,
            ids.uid.map_or_else(|| "?".to_owned(), |uid| uid.to_string()),
            ids.groups
        ),
        Err(err) => log::info!("Running as user `{}`, ids unavailable: {}", user, err),
    }
    match std::env::current_dir() {
        Ok(cwd) => log::info!("Working directory `{}`", cwd.display()),
        Err(err) => log::info!("Working directory unavailable: {}", err),
    }
}
