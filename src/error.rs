// Errors returned synchronously by the counter store and the query engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Banner id outside `[0, capacity)`.
    #[error("banner id {id} out of range (capacity {capacity})")]
    OutOfRange { id: usize, capacity: usize },

    /// `from > to`, or a time bound that could not be parsed.
    #[error("invalid time range: {0}")]
    InvalidTimeRange(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
