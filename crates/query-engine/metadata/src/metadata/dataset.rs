//! The dataset descriptor a caller reads from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::source::SourceKind;

/// A named source of records owned by a user.
///
/// `source` selects the backend: an HTTP URL or `<database>:<collection>`.
/// The serialized field names are a persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub owner: String,
    pub source: String,
    /// Field compared against the last read time when subscribing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_control_field: Option<String>,
    /// How the last read time is written into the where clause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_control_field_pattern: Option<String>,
}

impl Dataset {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Dataset {
            id: None,
            name: name.into(),
            owner: owner.into(),
            source: source.into(),
            subscription_control_field: None,
            subscription_control_field_pattern: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_subscription(
        mut self,
        control_field: impl Into<String>,
        control_field_pattern: Option<String>,
    ) -> Self {
        self.subscription_control_field = Some(control_field.into());
        self.subscription_control_field_pattern = control_field_pattern;
        self
    }

    /// Assign an identifier on first write. An existing one is kept.
    pub fn assign_id(&mut self) -> &str {
        self.id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .as_str()
    }

    /// The identifier used in messages, falling back to `owner/name` before
    /// one has been assigned.
    pub fn identity(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}/{}", self.owner, self.name),
        }
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        SourceKind::classify(&self.source)
    }

    pub fn is_subscribable(&self) -> bool {
        self.subscription_control_field
            .as_deref()
            .is_some_and(|field| !field.trim().is_empty())
    }
}
