use super::*;

pub use cli::*;
pub use config::*;
pub use logging::*;

pub(crate) mod internal {
    pub use std::path::PathBuf;
    pub use std::sync::LazyLock;
    pub use std::time::Duration;

    pub use clap::Parser;
    pub use color_eyre::eyre::{Result, WrapErr, bail};
    pub use resolve_path::PathResolveExt;
    pub use rssfilter_feeds::prelude::{self as rssfilter};
    pub use serde::{Deserialize, Serialize};
}
