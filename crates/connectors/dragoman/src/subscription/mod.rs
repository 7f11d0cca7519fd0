//! Restrict repeated reads of a dataset to what changed since the last one.

pub mod as_of;
pub mod formatter;

pub use as_of::AsOf;
pub use formatter::AsOfFormatter;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Cannot format AsOf for an unsupported pattern: {0}!")]
    UnsupportedPattern(String),
    #[error("Dataset: {0} has no subscription control field")]
    SubscriptionUnsupported(String),
}
