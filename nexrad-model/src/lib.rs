//!
//! # nexrad-model
//! A common model for representing decoded NEXRAD Level II weather radar data. Provides an
//! ergonomic, array-oriented accessor API suitable for downstream visualization or numerical
//! analysis, independent of which on-disk record format (Message 31 or the legacy Message 1)
//! produced a given radial.
//!
//! Optional features:
//! - `serde`: implement `serde::Serialize`/`Deserialize` for all model types.
//! - `chrono`: add `chrono`-based convenience accessors alongside the raw integer fields.
//!

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]

pub mod data;
pub mod result;

#[cfg(feature = "chrono")]
pub mod util;
