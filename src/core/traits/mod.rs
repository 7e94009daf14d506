//! Core trait definitions

pub mod collection;

pub use collection::CollectionApi;

#[cfg(test)]
pub use collection::MockCollectionApi;
