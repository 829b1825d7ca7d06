//! Shared primitives for the biomet evaluation workspace.
//!
//! `biomet-core` provides the foundation the other biomet crates build on:
//!
//! - **Error types** — [`BiometError`] and [`Result`] for structured error handling
//! - **Traits** — [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{BiometError, Result};
pub use traits::*;
