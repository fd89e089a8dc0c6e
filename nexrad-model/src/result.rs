//!
//! Contains the Result and Error types for NEXRAD model operations.
//!

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug, Clone, PartialEq)]
pub enum Error {
    /// An accessor was asked for a moment that is not present on the requested scan.
    #[error("moment not present: {0}")]
    MomentNotPresent(String),
}
