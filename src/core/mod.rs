//! Core functionality
//!
//! The paginated bulk operation driver, its data model, and the collaborator
//! trait it depends on.

pub mod operation;
pub mod traits;
pub mod types;
