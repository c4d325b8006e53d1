//! Batched configuration validation for Deploy Manager
//!
//! Validation never stops at the first problem. Checks record errors and
//! warnings into a [`ValidationErrors`] bag, and callers turn a non-empty bag
//! into [`Error::ValidationFailed`] once the whole pass is done.

pub mod error;
pub mod errors;
pub mod service;

pub use error::{Error, Result};
pub use errors::ValidationErrors;
pub use service::ValidationService;
