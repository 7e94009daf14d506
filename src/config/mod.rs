//! Configuration models
//!
//! Plain serde models with per-field defaults; the embedding application
//! decides where they are deserialized from.

pub mod backoff;
pub mod defaults;
pub mod operation;

pub use backoff::BackoffConfig;
pub use operation::OperationConfig;
