//! Order source abstraction layer
//!
//! The data-access side of the pipeline: each source fetches raw order
//! records and converts them into validated [`Order`](crate::core::Order)
//! values, skipping malformed records.

pub(crate) mod json;
pub(crate) mod loader;
pub(crate) mod record;

use crate::core::LoadResult;
use crate::error::AppError;

use json::{JsonFileSource, StdinSource};

/// Anything that can supply the raw order collection
pub(crate) trait OrderSource: Send + Sync {
    /// Human readable origin, used in logs and messages
    fn name(&self) -> String;

    /// Fetch and validate all orders. An error means nothing could be read.
    fn fetch(&self) -> Result<LoadResult, AppError>;
}

/// Box type for dynamic dispatch
pub(crate) type BoxedSource = Box<dyn OrderSource>;

/// Pick a source for an `--input` value: `-` is stdin, anything else a path
pub(crate) fn open_source(input: &str) -> BoxedSource {
    if input == "-" {
        Box::new(StdinSource)
    } else {
        Box::new(JsonFileSource::new(input))
    }
}
