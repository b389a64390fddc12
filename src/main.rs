mod config;
mod dashboard;
pub mod irrigation_api;
mod locale;
mod processors;
mod ticker;

use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt};

use crate::config::{Config, LoggingConfig};
use crate::dashboard::Renderer;
use crate::dashboard::terminal_renderer::TerminalRenderer;
use crate::irrigation_api::irrigation_client::IrrigationClient;
use crate::locale::{Clock, LocaleFormatter, PtBrFormatter, SystemClock};
use crate::processors::schedule_processor::ScheduleProcessor;
use crate::processors::status_processor::StatusProcessor;
use crate::ticker::Ticker;
use std::sync::Arc;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // Load configuration
    let config = Config::from_file(&config_path).or_else(|e| {
        if std::path::Path::new(&config_path).exists() {
            return Err(e);
        }
        println!("Config file not found. Creating example {}...", config_path);
        Config::save_example(&config_path)?;
        println!("Please edit {} with your settings and restart the application.", config_path);
        Err(e)
    })?;

    init_logging(&config.logging);

    let display_offset = config.display.utc_offset()?;
    let formatter: Arc<dyn LocaleFormatter> = Arc::new(PtBrFormatter::new(display_offset));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(display_offset));
    let renderer: Arc<dyn Renderer> = Arc::new(TerminalRenderer::new(std::io::stdout(), true));

    let client = Arc::new(IrrigationClient::new(
        &config.controller,
        config.intervals.request_timeout(),
    )?);

    let status_processor = Arc::new(StatusProcessor::new(
        client.clone(),
        renderer.clone(),
        formatter.clone(),
    ));
    let schedule_processor = Arc::new(ScheduleProcessor::new(
        client.clone(),
        renderer.clone(),
        formatter.clone(),
        clock,
    ));

    info!("Monitoring irrigation controller at {}", config.controller.base_url);
    let handle = Ticker::new(
        status_processor,
        schedule_processor,
        config.intervals.poll_interval(),
    )
    .start();

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {:?}", e);
    }
    info!("Shutting down");
    handle.stop().await;

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    // Directory for logs
    let log_dir = &config.directory;

    // One file per level
    let debug_file = rolling::daily(log_dir, &config.debug_file);
    let info_file = rolling::daily(log_dir, &config.info_file);
    let warn_file = rolling::daily(log_dir, &config.warn_file);
    let error_file = rolling::daily(log_dir, &config.error_file);

    let debug_layer = fmt::layer()
        .with_writer(debug_file)
        .with_ansi(false)
        .with_filter(EnvFilter::new("debug"));

    let info_layer = fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::LevelFilter::INFO);

    let warn_layer = fmt::layer()
        .with_writer(warn_file)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::LevelFilter::WARN);

    let error_layer = fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

    // The dashboard owns stdout, so console logs go to stderr
    let console_layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(&config.console_level));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(debug_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .init();
}
