/// Entry point for the hostapd Prometheus exporter.
///
/// This binary polls a local hostapd through `hostapd_cli` and serves the
/// collected access point and station metrics for Prometheus to scrape.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., invalid environment
/// variables or the metrics address is already in use).
///
/// # Examples
///
/// ```bash
/// RUST_LOG=info HOSTAPD_CTRL_DIR=/run/hostapd EXPORTER_PORT=9551 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    hostapd_exporter::run().await
}
