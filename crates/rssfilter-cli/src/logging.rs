//! Logging.

use super::*;

use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;

/// Log level requested on the command line.
pub fn log_level(cli: &Cli) -> Level {
    match cli.verbose {
        true => Level::TRACE,
        false => match cli.debug {
            true => Level::DEBUG,
            false => Level::INFO,
        },
    }
}

/// Setup logging.
/// Logs go to stderr (and optionally a file), never to stdout.
pub fn setup_logging(cli: &Cli, config: &Config) -> Result<()> {
    let level = log_level(cli);
    let filter = tracing_subscriber::filter::Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target("rssfilter", level)
        .with_target("rssfilter_feeds", level);

    // CLI layer (to stderr).
    let cli_logger = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filter.clone());

    // File layer.
    let file_logger = match config.log.as_ref() {
        Some(log_file) => {
            let filename = shellexpand::full(log_file)
                .wrap_err_with(|| {
                    format!("Unable to expand log file {}", log_file)
                })?
                .into_owned();
            let path = PathBuf::from(&filename);
            if let Some(parent_dir) = path.parent() {
                std::fs::create_dir_all(parent_dir).wrap_err_with(|| {
                    format!("Unable to initialize path for {}", filename)
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)
                .wrap_err_with(|| {
                    format!("Failed to create log file {}", log_file)
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(filter),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::Registry::default()
        .with(cli_logger)
        .with(file_logger);

    // Set this logger as global.
    if let Err(_) = tracing::subscriber::set_global_default(subscriber) {
        bail!("Unable to initialize logging.");
    }

    Ok(())
}
