//! Engine error type.
//!
//! Only session setup can fail at runtime. Everything that happens during
//! play is either a silent no-op (clicking a face-up slide) or a contract
//! violation guarded by an assertion.

use super::category::Category;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The category's images are missing or there are too few of them.
    #[error("not enough images for {category}: found {found}, need {required}")]
    ResourceNotFound {
        category: Category,
        found: usize,
        required: usize,
    },

    /// The start menu was given an index outside the category list.
    #[error("unknown category index {0}")]
    UnknownCategory(usize),

    /// Restart was requested before any game was started.
    #[error("no active session")]
    NoActiveSession,

    /// Walking the asset directory failed.
    #[error("asset scan failed: {0}")]
    Io(#[from] walkdir::Error),
}
