use thiserror::Error;

/// Errors returned by tree operations.
///
/// Only argument checks can fail; they happen before the tree is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
