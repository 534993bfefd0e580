use thiserror::Error;

use crate::CompileError;

/// Unified error type covering decoding, compilation, and I/O.
///
/// Returned by convenience methods like [`RuleSet::from_file()`](crate::RuleSet::from_file)
/// and [`Predicate::from_json()`](crate::Predicate::from_json).
#[derive(Debug, Error)]
pub enum SifterError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
