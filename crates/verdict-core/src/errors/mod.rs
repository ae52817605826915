//! Error taxonomy for the Verdict engine.
//!
//! Configuration and numeric-integrity failures abort the current call with
//! no partial result. Data-sufficiency outcomes (insufficient quorum) are
//! never errors — they are returned as explicit status values so callers can
//! branch without exception handling.

pub mod config_error;
pub mod error_code;
pub mod verdict_error;

pub use config_error::ConfigError;
pub use verdict_error::{ensure_finite, VerdictError, VerdictResult};
