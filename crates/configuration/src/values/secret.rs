use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::environment::Environment;

/// A value given inline or read from an environment variable at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Secret {
    Plain(String),
    #[serde(rename_all = "camelCase")]
    FromEnvironment { variable: String },
}

impl Secret {
    /// The value of this secret, or the name of the variable that is missing.
    pub fn resolve(&self, environment: &impl Environment) -> Result<String, String> {
        match self {
            Secret::Plain(value) => Ok(value.clone()),
            Secret::FromEnvironment { variable } => {
                environment.read(variable).ok_or_else(|| variable.clone())
            }
        }
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}
