use dashmap::DashMap;
use prometheus::IntCounter;

use crate::status::{ApStatus, MacAddress, StationRecord};
use crate::tracker::AssociationTracker;

use super::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ByteDirection {
    Tx,
    Rx,
}

impl ByteDirection {
    fn name(self) -> &'static str {
        match self {
            ByteDirection::Tx => "tx_bytes",
            ByteDirection::Rx => "rx_bytes",
        }
    }
}

/// Last byte totals reported by hostapd, keyed by (interface, station, direction).
///
/// Exported counters are advanced by the difference between consecutive
/// reports. A report below the previous one means hostapd restarted the count
/// (typically on reassociation), so the whole reported value is new traffic.
#[derive(Debug, Default)]
struct ByteTotals {
    last: DashMap<(String, MacAddress, ByteDirection), u64>,
}

impl ByteTotals {
    fn advance(
        &self,
        counter: &IntCounter,
        interface: &str,
        mac: MacAddress,
        direction: ByteDirection,
        value: u64,
    ) {
        let previous = self
            .last
            .insert((interface.to_owned(), mac, direction), value);
        let delta = match previous {
            Some(previous) if value < previous => {
                log::warn!(
                    "{} for station {} on {} restarted: reported {}, previously {}",
                    direction.name(),
                    mac,
                    interface,
                    value,
                    previous
                );
                value
            }
            Some(previous) => value - previous,
            None => value.saturating_sub(counter.get()),
        };
        if delta > 0 {
            counter.inc_by(delta);
        }
    }
}

/// Applies parsed hostapd responses to the exported metric set.
///
/// Gauges are overwritten every cycle. Byte counters accumulate hostapd's
/// totals across counter restarts and never decrease. Association counters are
/// incremented whenever the [`AssociationTracker`] reports a (re)association.
pub struct Reconciler {
    metrics: Metrics,
    tracker: AssociationTracker,
    byte_totals: ByteTotals,
}

impl Reconciler {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            tracker: AssociationTracker::new(),
            byte_totals: ByteTotals::default(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn tracker(&self) -> &AssociationTracker {
        &self.tracker
    }

    /// Applies one poll cycle for `interface`.
    ///
    /// A `None` sub-result means the corresponding query failed; the metrics it
    /// would have updated keep their previous values.
    pub fn reconcile(
        &self,
        interface: &str,
        ap_status: Option<&ApStatus>,
        stations: Option<&[StationRecord]>,
    ) {
        if let Some(ap_status) = ap_status {
            self.reconcile_ap(interface, ap_status);
        }
        if let Some(stations) = stations {
            self.reconcile_stations(interface, stations);
        }
    }

    pub fn reconcile_ap(&self, interface: &str, ap_status: &ApStatus) {
        self.metrics
            .ap_num_stations
            .with_label_values(&[interface])
            .set(ap_status.num_stations as f64);
        self.metrics
            .ap_info
            .with_label_values(&[
                interface,
                ap_status.ssid.as_str(),
                ap_status.channel.as_str(),
                ap_status.bssid.as_str(),
            ])
            .set(1.0);
    }

    pub fn reconcile_stations(&self, interface: &str, stations: &[StationRecord]) {
        for station in stations {
            self.reconcile_station(interface, station);
        }
        log::debug!(
            "Reconciled {} stations on {} ({} ever seen)",
            stations.len(),
            interface,
            self.tracker.size()
        );
    }

    fn reconcile_station(&self, interface: &str, station: &StationRecord) {
        let mac = station.mac.to_string();
        let labels = [interface, mac.as_str()];
        let m = &self.metrics;

        m.sta_signal_dbm
            .with_label_values(&labels)
            .set(station.signal_dbm as f64);
        m.sta_connected_seconds
            .with_label_values(&labels)
            .set(station.connected_seconds as f64);
        m.sta_tx_rate_kbps
            .with_label_values(&labels)
            .set(station.tx_rate_kbps as f64);
        m.sta_rx_rate_kbps
            .with_label_values(&labels)
            .set(station.rx_rate_kbps as f64);
        m.sta_inactive_seconds
            .with_label_values(&labels)
            .set(station.inactive_seconds);

        self.byte_totals.advance(
            &m.sta_tx_bytes.with_label_values(&labels),
            interface,
            station.mac,
            ByteDirection::Tx,
            station.tx_bytes,
        );
        self.byte_totals.advance(
            &m.sta_rx_bytes.with_label_values(&labels),
            interface,
            station.mac,
            ByteDirection::Rx,
            station.rx_bytes,
        );

        if self.tracker.observe(station.mac, station.connected_seconds) {
            log::debug!("Station {} associated on {}", mac, interface);
            m.sta_associations.with_label_values(&labels).inc();
        }
    }
}
