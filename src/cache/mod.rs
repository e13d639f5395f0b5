// Cache module for the local filesystem key-value store.
// One JSON file per contributor/scope record.

pub mod paths;
pub mod store;

pub use store::Store;
