use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const PORT_VAR: &str = "EXPORTER_PORT";
pub const ADDR_VAR: &str = "EXPORTER_ADDR";
pub const CTRL_DIR_VAR: &str = "HOSTAPD_CTRL_DIR";
pub const INTERVAL_VAR: &str = "SCRAPE_INTERVAL";
pub const CLI_VAR: &str = "HOSTAPD_CLI";

const DEFAULT_PORT: u16 = 9551;
const DEFAULT_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_CTRL_DIR: &str = "/run/hostapd";
const DEFAULT_INTERVAL_SECS: u64 = 5;
const DEFAULT_CLI: &str = "hostapd_cli";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value for environment variable `{var}`: `{value}`: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the metrics server binds to.
    pub listen_addr: SocketAddr,
    /// hostapd control-socket directory.
    pub ctrl_dir: PathBuf,
    /// Path or name of the `hostapd_cli` binary.
    pub cli: PathBuf,
    /// Delay between two poll cycles.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(DEFAULT_ADDR, DEFAULT_PORT),
            ctrl_dir: PathBuf::from(DEFAULT_CTRL_DIR),
            cli: PathBuf::from(DEFAULT_CLI),
            poll_interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
        }
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|err: T::Err| Error::InvalidValue {
                var,
                reason: err.to_string(),
                value,
            }),
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hostapd_exporter::config::Config;
    /// let config = Config::from_lookup(|var| match var {
    ///     "EXPORTER_PORT" => Some("9100".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.listen_addr.port(), 9100);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = parse_var(PORT_VAR, lookup(PORT_VAR), DEFAULT_PORT)?;
        let addr = parse_var(ADDR_VAR, lookup(ADDR_VAR), DEFAULT_ADDR)?;
        let interval_secs =
            parse_var(INTERVAL_VAR, lookup(INTERVAL_VAR), DEFAULT_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(Error::InvalidValue {
                var: INTERVAL_VAR,
                value: interval_secs.to_string(),
                reason: "interval must be at least one second".to_owned(),
            });
        }

        Ok(Self {
            listen_addr: SocketAddr::new(addr, port),
            ctrl_dir: lookup(CTRL_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CTRL_DIR)),
            cli: lookup(CLI_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLI)),
            poll_interval: Duration::from_secs(interval_secs),
        })
    }
}
