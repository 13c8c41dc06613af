//! Dataset cache refresh and index building.
//!
//! The cached dataset file is created or replaced by the [`Refresher`],
//! read (never mutated) by the builders, and never deleted here.

mod build;
mod error;
mod refresh;

pub use build::{build_flat, build_structured};
pub use error::{DatasetError, FetchError};
pub use refresh::{RefreshConfig, RefreshOutcome, Refresher};
