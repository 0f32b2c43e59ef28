//! Shelly Plug Exporter Binary
//!
//! A standalone Prometheus exporter bridging a Shelly Plug's local status API
//! to a scrape endpoint.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shellyplug_exporter::{
    start_web_server, DeviceClient, PlugMetrics, Poller, WebConfig, DEFAULT_METRICS_PORT,
    DEFAULT_POLL_INTERVAL_SECS, DEVICE_URL_ENV,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "shellyplug-exporter")]
#[command(about = "🔌 Prometheus exporter for Shelly Plug smart plugs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    long_about = "Polls a Shelly Plug's local Shelly.GetStatus endpoint and exposes the readings as Prometheus gauges"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_METRICS_PORT)]
    port: u16,

    /// Device poll interval in seconds
    #[arg(short, long, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the exporter (default)
    Serve,

    /// Fetch a single device status and exit
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
struct SnapshotArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve) | None => {
            serve_command(&cli).await?;
        }
        Some(Commands::Snapshot(args)) => {
            snapshot_command(args).await?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Read the device base URL from the environment; empty or unset is fatal.
fn device_url() -> anyhow::Result<String> {
    device_url_from(std::env::var(DEVICE_URL_ENV).ok())
}

fn device_url_from(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(url) if !url.is_empty() => Ok(url),
        _ => {
            error!("{DEVICE_URL_ENV} is empty");
            anyhow::bail!("{DEVICE_URL_ENV} must be set to the device base URL")
        }
    }
}

async fn serve_command(cli: &Cli) -> anyhow::Result<()> {
    info!("Starting Shelly Plug exporter...");

    let url = device_url()?;
    let client = DeviceClient::new(url).context("invalid device configuration")?;
    let metrics = Arc::new(PlugMetrics::new().context("failed to build gauge registry")?);

    let poller = Poller::new(client, metrics.clone())
        .with_interval(Duration::from_secs(cli.interval));

    let shutdown = CancellationToken::new();
    let poller_task = tokio::spawn(poller.run(shutdown.clone()));
    info!("Started device poller with {}s interval", cli.interval);

    let config = WebConfig::new(&cli.host, cli.port);
    let result = start_web_server(config, metrics).await;

    shutdown.cancel();
    poller_task.await?;
    result?;

    Ok(())
}

async fn snapshot_command(args: &SnapshotArgs) -> anyhow::Result<()> {
    let url = device_url()?;
    let client = DeviceClient::new(url).context("invalid device configuration")?;
    let status = client
        .fetch_status()
        .await
        .context("failed to fetch device status")?;

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&status)?;
            println!("{}", json);
        }
        "pretty" => {
            print_pretty_status(&status);
        }
        _ => {
            error!("Unsupported format: {}. Use 'json' or 'pretty'", args.format);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_pretty_status(status: &shellyplug_exporter::DeviceStatus) {
    println!("🔌 Shelly Plug Status");
    println!("=====================");
    println!();

    println!("Device:");
    println!("  MAC: {}", status.sys.mac);
    match status.update_version() {
        Some(version) => println!("  Firmware update available: {version}"),
        None => println!("  Firmware: up to date"),
    }
    println!();

    println!("Switch:");
    println!(
        "  Output: {}",
        if status.switch.output { "ON" } else { "OFF" }
    );
    println!("  Power: {:.1} W", status.switch.apower);
    println!("  Voltage: {:.1} V", status.switch.voltage);
    println!("  Current: {:.3} A", status.switch.current);
    println!("  Energy total: {:.1} Wh", status.switch.aenergy.total);
    println!("  Temperature: {:.1}°C", status.switch.temperature.celsius);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["shellyplug-exporter", "--port", "9090"]).unwrap();
        assert_eq!(cli.port, 9090);
    }

    #[test]
    fn test_default_values() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["shellyplug-exporter"]).unwrap();
        assert_eq!(cli.port, DEFAULT_METRICS_PORT);
        assert_eq!(cli.interval, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(cli.host, "0.0.0.0");
    }

    #[test]
    fn test_device_url_requires_a_value() {
        assert!(device_url_from(None).is_err());
        assert!(device_url_from(Some(String::new())).is_err());
        assert_eq!(
            device_url_from(Some("http://192.168.1.50".to_string())).unwrap(),
            "http://192.168.1.50"
        );
    }

    #[test]
    fn test_snapshot_args() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["shellyplug-exporter", "snapshot", "--format", "json"])
            .unwrap();
        match cli.command {
            Some(Commands::Snapshot(args)) => assert_eq!(args.format, "json"),
            _ => panic!("expected snapshot subcommand"),
        }
    }
}
