use thiserror::Error;

use crate::logic::validator::BlockReason;

#[derive(Debug, Error)]
pub enum GardenError {
    #[error("placement rejected: {0}")]
    Blocked(BlockReason),
    #[error("variant '{0}' not found in the catalog")]
    UnknownVariant(String),
    #[error("garden invariant violated: {0}")]
    InvariantViolation(String),
    #[error(
        "garden dimensions must be positive and cover at most {} cells (got {rows}x{cols})",
        crate::models::garden::MAX_GARDEN_CELLS
    )]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("invalid plant catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
