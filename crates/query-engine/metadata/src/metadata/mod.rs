//! Metadata describing the datasets a caller can read and where they live.

pub mod dataset;
pub mod source;

// re-export without modules
pub use dataset::*;
pub use source::*;

/// A generic key/value record, the unit every repository yields.
pub type Record = serde_json::Map<String, serde_json::Value>;
