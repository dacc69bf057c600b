//! The exported Prometheus metric set.
//!
//! All metrics live in the `hostapd` namespace of a private [`Registry`] that
//! is written by the poll loop and gathered by the HTTP server.
//!
//! - [`Metrics`]: the registry and every metric vector.
//! - [`Reconciler`]: applies parsed hostapd responses to [`Metrics`].

mod reconciler;

pub use reconciler::Reconciler;

use prometheus::{Encoder, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};

const NAMESPACE: &str = "hostapd";

const AP_LABELS: &[&str] = &["interface"];
const AP_INFO_LABELS: &[&str] = &["interface", "ssid", "channel", "bssid"];
const STA_LABELS: &[&str] = &["interface", "mac"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to register metric: {0}")]
    Register(#[source] prometheus::Error),
    #[error("failed to encode metrics: {0}")]
    Encode(#[source] prometheus::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    /// Identity marker of the AP, always 1.
    pub ap_info: GaugeVec,
    pub ap_num_stations: GaugeVec,

    pub sta_signal_dbm: GaugeVec,
    pub sta_tx_bytes: IntCounterVec,
    pub sta_rx_bytes: IntCounterVec,
    pub sta_tx_rate_kbps: GaugeVec,
    pub sta_rx_rate_kbps: GaugeVec,
    pub sta_connected_seconds: GaugeVec,
    pub sta_inactive_seconds: GaugeVec,
    /// Inferred (re)association events.
    pub sta_associations: IntCounterVec,
}

fn opts(name: &str, help: &str) -> Opts {
    Opts::new(name, help).namespace(NAMESPACE)
}

impl Metrics {
    /// Creates all metrics and registers them in a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Register`] if a metric descriptor is invalid or clashes
    /// with another one.
    pub fn new() -> Result<Self> {
        let metrics = Self {
            registry: Registry::new(),
            ap_info: GaugeVec::new(opts("ap_info", "Hostapd AP info"), AP_INFO_LABELS)
                .map_err(Error::Register)?,
            ap_num_stations: GaugeVec::new(
                opts("ap_num_stations", "Active stations"),
                AP_LABELS,
            )
            .map_err(Error::Register)?,
            sta_signal_dbm: GaugeVec::new(opts("sta_signal_dBm", "Signal strength"), STA_LABELS)
                .map_err(Error::Register)?,
            sta_tx_bytes: IntCounterVec::new(opts("sta_tx_bytes_total", "TX bytes"), STA_LABELS)
                .map_err(Error::Register)?,
            sta_rx_bytes: IntCounterVec::new(opts("sta_rx_bytes_total", "RX bytes"), STA_LABELS)
                .map_err(Error::Register)?,
            sta_tx_rate_kbps: GaugeVec::new(opts("sta_tx_rate_kbps", "TX bitrate"), STA_LABELS)
                .map_err(Error::Register)?,
            sta_rx_rate_kbps: GaugeVec::new(opts("sta_rx_rate_kbps", "RX bitrate"), STA_LABELS)
                .map_err(Error::Register)?,
            sta_connected_seconds: GaugeVec::new(
                opts("sta_connected_seconds", "Conn duration"),
                STA_LABELS,
            )
            .map_err(Error::Register)?,
            sta_inactive_seconds: GaugeVec::new(
                opts("sta_inactive_seconds", "Time since last activity"),
                STA_LABELS,
            )
            .map_err(Error::Register)?,
            sta_associations: IntCounterVec::new(
                opts("sta_associations_total", "Total association events"),
                STA_LABELS,
            )
            .map_err(Error::Register)?,
        };
        metrics.register_all()?;

        Ok(metrics)
    }

    fn register_all(&self) -> Result<()> {
        let collectors: [Box<dyn prometheus::core::Collector>; 10] = [
            Box::new(self.ap_info.clone()),
            Box::new(self.ap_num_stations.clone()),
            Box::new(self.sta_signal_dbm.clone()),
            Box::new(self.sta_tx_bytes.clone()),
            Box::new(self.sta_rx_bytes.clone()),
            Box::new(self.sta_tx_rate_kbps.clone()),
            Box::new(self.sta_rx_rate_kbps.clone()),
            Box::new(self.sta_connected_seconds.clone()),
            Box::new(self.sta_inactive_seconds.clone()),
            Box::new(self.sta_associations.clone()),
        ];
        for collector in collectors {
            self.registry.register(collector).map_err(Error::Register)?;
        }
        Ok(())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders the current snapshot in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if a metric family cannot be encoded.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = String::new();
        encoder
            .encode_utf8(&self.registry.gather(), &mut buffer)
            .map_err(Error::Encode)?;
        Ok(buffer)
    }

    pub fn content_type() -> String {
        TextEncoder::new().format_type().to_owned()
    }
}
