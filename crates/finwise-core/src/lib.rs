//! Personal-finance calculation engine.
//!
//! Every engine is a pure function from a plain input struct to a
//! [`ComputationOutput`] envelope. Nothing here performs I/O or keeps state
//! between calls; the UI layer owns persistence and feeds already-sanitized
//! numbers in (see [`sanitize`] for the text-to-number boundary).

pub mod error;
pub mod sanitize;
pub mod time_value;
pub mod types;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "budget")]
pub mod budget;

#[cfg(feature = "savings")]
pub mod savings;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "retirement")]
pub mod retirement;

#[cfg(feature = "planner")]
pub mod planner;

pub use error::FinwiseError;
pub use types::*;

/// Standard result type for all fallible finwise operations
pub type FinwiseResult<T> = Result<T, FinwiseError>;
