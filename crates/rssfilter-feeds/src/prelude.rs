use super::*;

pub use datetime::*;
pub use entry::*;
pub use error::*;
pub use feed::*;
pub use filter::*;
pub use filter_config::*;
pub use pipeline::*;

pub(crate) mod internal {
    pub use std::borrow::Cow;
    pub use std::sync::Arc;

    pub use atom_syndication::{self as atom};
    pub use serde::{Deserialize, Serialize};
}
