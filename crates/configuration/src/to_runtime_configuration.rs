//! Convert a parsed configuration into the runtime one.

use std::time::Duration;

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::version1::ParsedConfiguration;

/// Resolve every secret of `parsed_config` against `environment`.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: &impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = parsed_config
        .document_store
        .connection_uri
        .0
        .resolve(environment)
        .map_err(
            |variable| MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                setting: "documentStore.connectionUri".to_string(),
                variable,
            },
        )?;

    Ok(Configuration {
        connection_uri,
        app_name: parsed_config.document_store.app_name,
        http_timeout: Duration::from_secs(parsed_config.http.timeout_seconds),
        user_agent: parsed_config.http.user_agent,
        cache_capacity: parsed_config.router.cache_capacity,
        cache_expiry: Duration::from_secs(parsed_config.router.cache_expiry_seconds),
    })
}
