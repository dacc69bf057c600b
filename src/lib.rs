/// hostapd exporter: publishes the state of a local hostapd access point as
/// Prometheus metrics.
///
/// This library polls hostapd through `hostapd_cli`, parses the `status` and
/// `all_sta` responses, infers station (re)associations and serves the
/// resulting metric snapshot over HTTP.
pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod hostapd;
pub mod identity;
pub mod metrics;
pub mod status;
pub mod tracker;

/// Runs the hostapd exporter.
///
/// Reads the configuration from the environment, starts the metrics server and
/// then polls hostapd until the process is terminated.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid environment variables (e.g., a non-numeric `EXPORTER_PORT`).
/// - Failure to register the exported metrics.
/// - Failure to bind the metrics server address.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    identity::log_identity();
    log::debug!("Configuration: {:?}", config);

    let metrics = metrics::Metrics::new()?;

    let listener = api::APIServer::bind(config.listen_addr).await?;
    log::info!("Starting hostapd exporter on {}", config.listen_addr);
    {
        let api = api::APIServer::new(metrics.clone());
        tokio::spawn(async move {
            if let Err(err) = api.serve(listener).await {
                log::error!("metrics server stopped: {}", err);
            }
        });
    }

    let collector = collector::Collector::new(
        hostapd::ControlClient::new(config.cli, config.ctrl_dir.clone()),
        hostapd::InterfaceResolver::new(config.ctrl_dir),
        metrics::Reconciler::new(metrics),
    );
    collector.run(config.poll_interval).await;

    Ok(())
}
