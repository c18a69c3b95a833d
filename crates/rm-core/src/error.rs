//! Core error type.
//!
//! Search itself never fails; these errors come from parsing ride fields and
//! validating configuration.  `rm-store` wraps `CoreError` as one variant of
//! its own error enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `rm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
