//! Typed views over the text returned by the hostapd control interface.
//!
//! hostapd answers `status` with a flat `key=value` block and `all_sta` with a
//! concatenation of per-station blocks, each introduced by a line holding only
//! the station's MAC address. This module turns both into typed records.
//!
//! # Main types
//!
//! - [`ApStatus`]: the AP-level facts extracted from `status`.
//! - [`StationRecord`]: one associated station extracted from `all_sta`.
//! - [`MacAddress`]: a station or BSS identifier in canonical lowercase form.
//!
//! Parsing never fails: lines that do not fit the expected shape are skipped
//! and missing or malformed fields fall back to defaults.

mod error;
mod parser;

pub use error::{Error, Result};
pub use parser::{Line, parse_key_values, parse_station_list};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Candidate keys for the number of associated stations, most specific first.
const NUM_STA_KEYS: &[&str] = &["num_sta[0]", "num_sta"];
const SSID_KEYS: &[&str] = &["ssid[0]", "ssid"];
const CHANNEL_KEYS: &[&str] = &["channel"];
const BSSID_KEYS: &[&str] = &["bssid[0]", "bssid"];

const SIGNAL_KEYS: &[&str] = &["signal"];
const CONNECTED_TIME_KEYS: &[&str] = &["connected_time"];
const TX_RATE_KEYS: &[&str] = &["tx_rate"];
const RX_RATE_KEYS: &[&str] = &["rx_rate"];
const TX_BYTES_KEYS: &[&str] = &["tx_bytes"];
const RX_BYTES_KEYS: &[&str] = &["rx_bytes"];
const INACTIVE_MS_KEYS: &[&str] = &["inactive_ms", "inactive_msec"];

const UNKNOWN: &str = "unknown";
const NO_CHANNEL: &str = "0";

/// Returns the first non-empty value among `candidates`, in priority order.
///
/// Multi-BSS hostapd builds report indexed keys (`ssid[0]`) while single-BSS
/// builds report the bare key (`ssid`).
pub fn lookup<'a>(fields: &HashMap<&str, &'a str>, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|key| fields.get(key).copied())
        .find(|value| !value.is_empty())
}

fn lookup_parsed<T: FromStr + Default>(fields: &HashMap<&str, &str>, candidates: &[&str]) -> T {
    lookup(fields, candidates)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_default()
}

/// A MAC address in canonical lowercase colon-hex form, e.g. `aa:bb:cc:dd:ee:ff`.
///
/// # Examples
///
/// ```
/// # use hostapd_exporter::status::MacAddress;
/// let mac: MacAddress = "11:22:33:44:55:66".parse().unwrap();
/// assert_eq!(mac.to_string(), "11:22:33:44:55:66");
/// assert!("11:22:33:44:55:6G".parse::<MacAddress>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    /// Parses the canonical form only: six lowercase hex pairs joined by `:`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMacAddress(s.to_owned());
        let bytes = s.as_bytes();
        if bytes.len() != 17 {
            return Err(invalid());
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            let start = i * 3;
            let pair = &bytes[start..start + 2];
            if !pair
                .iter()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
            {
                return Err(invalid());
            }
            if i < 5 && bytes[start + 2] != b':' {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(&s[start..start + 2], 16).map_err(|_| invalid())?;
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// AP-level facts reported by the `status` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApStatus {
    /// Number of associated stations.
    pub num_stations: u64,
    /// Network name.
    pub ssid: String,
    /// Operating channel, kept verbatim as reported.
    pub channel: String,
    /// MAC address of the BSS.
    pub bssid: String,
}

impl Default for ApStatus {
    fn default() -> Self {
        Self {
            num_stations: 0,
            ssid: UNKNOWN.to_owned(),
            channel: NO_CHANNEL.to_owned(),
            bssid: UNKNOWN.to_owned(),
        }
    }
}

impl ApStatus {
    /// Builds the AP status from parsed `status` fields.
    pub fn from_fields(fields: &HashMap<&str, &str>) -> Self {
        Self {
            num_stations: lookup_parsed(fields, NUM_STA_KEYS),
            ssid: lookup(fields, SSID_KEYS).unwrap_or(UNKNOWN).to_owned(),
            channel: lookup(fields, CHANNEL_KEYS).unwrap_or(NO_CHANNEL).to_owned(),
            bssid: lookup(fields, BSSID_KEYS).unwrap_or(UNKNOWN).to_owned(),
        }
    }

    /// Parses the raw output of the `status` command.
    pub fn parse(text: &str) -> Self {
        Self::from_fields(&parse_key_values(text))
    }
}

/// A single station as reported by the `all_sta` command.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub mac: MacAddress,
    /// Signal strength in dBm.
    pub signal_dbm: i64,
    /// Time since the station associated.
    pub connected_seconds: u64,
    pub tx_rate_kbps: u64,
    pub rx_rate_kbps: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    /// Time since the last frame from the station.
    pub inactive_seconds: f64,
}

impl StationRecord {
    /// Builds a station record from the fields of one `all_sta` block.
    pub fn from_fields(mac: MacAddress, fields: &HashMap<&str, &str>) -> Self {
        let inactive_ms: u64 = lookup_parsed(fields, INACTIVE_MS_KEYS);
        Self {
            mac,
            signal_dbm: lookup_parsed(fields, SIGNAL_KEYS),
            connected_seconds: lookup_parsed(fields, CONNECTED_TIME_KEYS),
            tx_rate_kbps: lookup_parsed(fields, TX_RATE_KEYS),
            rx_rate_kbps: lookup_parsed(fields, RX_RATE_KEYS),
            tx_bytes: lookup_parsed(fields, TX_BYTES_KEYS),
            rx_bytes: lookup_parsed(fields, RX_BYTES_KEYS),
            inactive_seconds: inactive_ms as f64 / 1000.0,
        }
    }

    /// Parses the raw output of the `all_sta` command into records, in input order.
    pub fn parse_all(text: &str) -> Vec<Self> {
        parse_station_list(text)
            .into_iter()
            .map(|(mac, fields)| Self::from_fields(mac, &fields))
            .collect()
    }
}
