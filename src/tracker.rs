use dashmap::DashMap;

use crate::status::MacAddress;

/// Infers station (re)association from the connected time hostapd reports.
///
/// hostapd does not expose association events through `all_sta`. A station is
/// considered (re)associated when it is seen for the first time, or when its
/// connected time is lower than at the previous observation.
///
/// Entries are never removed, so a station that leaves and later returns with a
/// larger connected time than last recorded is not counted again.
#[derive(Debug, Default)]
pub struct AssociationTracker {
    connected: DashMap<MacAddress, u64>,
}

impl AssociationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest connected time for `mac`.
    ///
    /// # Returns
    ///
    /// `true` if the station is new or its connected time went backwards.
    pub fn observe(&self, mac: MacAddress, connected_seconds: u64) -> bool {
        match self.connected.insert(mac, connected_seconds) {
            None => true,
            Some(previous) => connected_seconds < previous,
        }
    }

    /// Returns the last connected time recorded for `mac`.
    pub fn last_connected(&self, mac: &MacAddress) -> Option<u64> {
        self.connected.get(mac).map(|entry| *entry)
    }

    /// Number of stations ever observed.
    pub fn size(&self) -> usize {
        self.connected.len()
    }
}
