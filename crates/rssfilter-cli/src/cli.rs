//! CLI.

use super::*;

/// Fetch a feed, keep the entries matching the given patterns, and print
/// the filtered feed.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Feed to fetch and filter (url or path).
    pub source: String,
    /// Regexes that entry titles must match.
    #[arg(
        short,
        long = "title-filter",
        value_name = "REGEX",
        num_args = 1..
    )]
    pub title: Vec<String>,
    /// Regexes that entry summaries must match.
    #[arg(
        short,
        long = "summary-filter",
        value_name = "REGEX",
        num_args = 1..
    )]
    pub summary: Vec<String>,
    /// Regexes that entry links must match.
    #[arg(
        short = 'u',
        long = "url-filter",
        value_name = "REGEX",
        num_args = 1..
    )]
    pub url: Vec<String>,
    /// How two filters combine [default: OR].
    #[arg(long = "op", visible_alias = "operation", value_name = "AND|OR")]
    pub operation: Option<rssfilter::Operation>,
    /// Match patterns regardless of case.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,
    /// Output format (rss or atom) [default: rss].
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<rssfilter::SyndicationFormat>,
    /// User agent for fetching remote feeds.
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,
    /// Request timeout for remote feeds (e.g. `30s`).
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,
    /// Configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Debug logging.
    #[arg(short, long)]
    pub debug: bool,
    /// Trace logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Path of the configuration file, and whether it was asked for.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.resolve().into_owned(), true),
            None => (
                PathBuf::from(DEFAULT_CONFIG_PATH.as_str())
                    .resolve()
                    .into_owned(),
                false,
            ),
        }
    }

    /// Read the configuration file.
    /// A missing default file is an empty configuration.
    pub fn parse_config(&self) -> Result<Config> {
        let (config_path, explicit) = self.config_path();
        if !config_path.exists() {
            if explicit {
                bail!("Config file {:?} does not exist", config_path);
            }
            return Ok(Config::default());
        }

        let config_data = std::fs::read_to_string(&config_path)
            .wrap_err_with(|| {
                format!("Unable to read config file {:?}", config_path)
            })?;
        toml::from_str::<Config>(&config_data).wrap_err_with(|| {
            format!("Configuration file {:?} is not valid", config_path)
        })
    }
}
