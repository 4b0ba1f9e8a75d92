//! Feed entries.

use super::*;

mod entry;
mod field;

pub use entry::*;
pub use field::*;
