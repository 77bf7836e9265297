use thiserror::Error;

/// Dataset validation failures, fatal before any query runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Tables are not row-aligned: {restaurants} restaurants, {encoded} encoded rows")]
    MisalignedTables { restaurants: usize, encoded: usize },

    #[error("No cuisine columns found in encoded dataset")]
    NoCuisineColumns,

    #[error("Duplicate encoded column: {0}")]
    DuplicateColumn(String),

    #[error("Encoded row {row} has {actual} values, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },
}

/// Per-query failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown cuisine: {0}")]
    UnknownCuisine(String),

    #[error("Not enough restaurants to recommend: found {found}")]
    InsufficientCandidates { found: usize },
}

pub type RecommendResult<T> = std::result::Result<T, RecommendError>;
