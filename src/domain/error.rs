use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("page_size must be greater than zero, got {0}")]
    InvalidPageSize(i64),

    #[error("page index must not be negative, got {0}")]
    InvalidPageIndex(i64),
}
