//! rssfilter.

mod cli;
mod config;
mod logging;
pub mod prelude;


use prelude::internal::*;
use prelude::*;

static DEFAULT_CONFIG_PATH: LazyLock<String> = LazyLock::new(|| {
    use directories::ProjectDirs;
    if let Some(dirs) = ProjectDirs::from("", "", "rssfilter") {
        let mut config = dirs.config_dir().to_path_buf();
        config.push("rssfilter.toml");
        String::from(config.to_string_lossy())
    } else {
        "~/.config/rssfilter/rssfilter.toml".to_owned()
    }
});

/// Entry point for rssfilter.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initial setup.
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = cli
        .parse_config()
        .wrap_err("Failed to parse config")?
        .with_cli(&cli);
    setup_logging(&cli, &config)?;

    // Patterns are compiled before anything is fetched.
    let predicate = config.filters.predicate().wrap_err("Invalid filters")?;
    tracing::debug!(
        "Filtering {} with {:?} ({})",
        cli.source,
        config.filters.patterns(),
        config.filters.operation
    );

    let document = config
        .feed_filter()
        .run(cli.source.as_str(), predicate.as_ref())
        .await
        .wrap_err_with(|| format!("Unable to filter {}", cli.source))?;
    println!("{document}");

    Ok(())
}
