use std::time::{Duration, Instant};

use crate::error::ResultOkLogExt;
use crate::hostapd::{ControlInterface, InterfaceResolver};
use crate::metrics::Reconciler;
use crate::status::{ApStatus, StationRecord};

const STATUS_COMMAND: &str = "status";
const ALL_STA_COMMAND: &str = "all_sta";

/// Drives the periodic poll of hostapd: resolve the interface, query `status`
/// and `all_sta`, and reconcile the results into the exported metrics.
pub struct Collector<C> {
    client: C,
    resolver: InterfaceResolver,
    reconciler: Reconciler,
}

impl<C: ControlInterface> Collector<C> {
    pub fn new(client: C, resolver: InterfaceResolver, reconciler: Reconciler) -> Self {
        Self {
            client,
            resolver,
            reconciler,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Runs `command` and returns its output, or `None` if the query failed or
    /// returned nothing. Failures are logged.
    async fn fetch(&self, command: &str, interface: &str) -> Option<String> {
        self.client
            .query(command, Some(interface))
            .await
            .ok_log()
            .filter(|text| !text.trim().is_empty())
    }

    /// Runs a single poll cycle at `now`.
    ///
    /// # Returns
    ///
    /// `false` if no interface is known and the cycle was skipped.
    pub async fn poll_once(&mut self, now: Instant) -> bool {
        let Some(interface) = self.resolver.current(now).map(str::to_owned) else {
            return false;
        };

        let ap_status = self
            .fetch(STATUS_COMMAND, &interface)
            .await
            .map(|text| ApStatus::parse(&text));
        let stations = self
            .fetch(ALL_STA_COMMAND, &interface)
            .await
            .map(|text| StationRecord::parse_all(&text));

        self.reconciler
            .reconcile(&interface, ap_status.as_ref(), stations.as_deref());
        true
    }

    /// Polls forever, once per `period`. The first cycle runs immediately.
    pub async fn run(mut self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let before = Instant::now();
            self.poll_once(before).await;
            log::trace!(
                "poll_once() took {} milliseconds",
                before.elapsed().as_millis()
            );
        }
    }
}
