//! rssfilter feed fetching, filtering, and re-syndication.

mod datetime;
mod entry;
mod error;
mod feed;
mod filter;
mod filter_config;
mod pipeline;
pub mod prelude;

#[cfg(test)]
mod tests;

use prelude::internal::*;
use prelude::*;
