//! Configuration for the gateway.

use std::time::Duration;

/// Everything needed to serve reads at runtime.
///
/// Values of this type are produced from a `ParsedConfiguration` by
/// `make_runtime_configuration`, once every secret has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub connection_uri: String,
    pub app_name: Option<String>,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub cache_capacity: usize,
    pub cache_expiry: Duration,
}
