//! Version 1 of the configuration file format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{ConnectionUri, Secret};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";
pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "DRAGOMAN_MONGODB_URI";

/// The configuration as it is written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: u32,
    pub document_store: DocumentStoreSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub router: RouterSettings,
}

/// How to reach the document store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStoreSettings {
    /// Connection string for a MongoDB deployment.
    pub connection_uri: ConnectionUri,
    /// Reported to the server in the connection handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

/// Settings of the client used for HTTP sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    #[serde(default = "timeout_seconds_default")]
    pub timeout_seconds: u64,
    #[serde(default = "user_agent_default")]
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout_seconds: timeout_seconds_default(),
            user_agent: user_agent_default(),
        }
    }
}

fn timeout_seconds_default() -> u64 {
    30
}

fn user_agent_default() -> String {
    format!("dragoman/{}", env!("CARGO_PKG_VERSION"))
}

/// Bounds of the cache of routing decisions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouterSettings {
    /// Most datasets remembered at once. Zero disables the cache.
    #[serde(default = "cache_capacity_default")]
    pub cache_capacity: usize,
    #[serde(default = "cache_expiry_seconds_default")]
    pub cache_expiry_seconds: u64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        RouterSettings {
            cache_capacity: cache_capacity_default(),
            cache_expiry_seconds: cache_expiry_seconds_default(),
        }
    }
}

fn cache_capacity_default() -> usize {
    100
}

fn cache_expiry_seconds_default() -> u64 {
    600
}

impl ParsedConfiguration {
    /// A configuration that reads its connection string from
    /// `DRAGOMAN_MONGODB_URI` and uses defaults for everything else.
    pub fn initial() -> Self {
        ParsedConfiguration {
            version: CURRENT_VERSION,
            document_store: DocumentStoreSettings {
                connection_uri: ConnectionUri(Secret::FromEnvironment {
                    variable: DEFAULT_CONNECTION_URI_VARIABLE.into(),
                }),
                app_name: Some("dragoman".to_string()),
            },
            http: HttpSettings::default(),
            router: RouterSettings::default(),
        }
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = fs::read_to_string(&configuration_file)
        .await
        .map_err(|source| ParseConfigurationError::IoError {
            file_path: configuration_file.clone(),
            source,
        })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            file_path: configuration_file,
            version: parsed_config.version,
        });
    }

    Ok(parsed_config)
}

/// Write the parsed configuration and its JSON schema into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).await?;

    fs::write(
        out_dir.join(CONFIGURATION_FILENAME),
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )
    .await?;

    let schema = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        out_dir.join(CONFIGURATION_JSONSCHEMA_FILENAME),
        serde_json::to_string_pretty(&schema)? + "\n",
    )
    .await?;

    Ok(())
}
