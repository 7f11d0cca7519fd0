use chrono::{DateTime, Utc};
use query_engine_metadata::metadata::Dataset;

use super::{AsOfFormatter, Error};

/// Adds a freshness predicate to a where clause so that each read only sees
/// records whose control field moved past the previous read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsOf {
    field: String,
    formatter: AsOfFormatter,
    last_read: DateTime<Utc>,
}

impl AsOf {
    /// Fails when `pattern` cannot be formatted.
    pub fn new(
        field: impl Into<String>,
        pattern: Option<&str>,
        last_read: DateTime<Utc>,
    ) -> Result<Self, Error> {
        Ok(AsOf {
            field: field.into(),
            formatter: AsOfFormatter::for_pattern(pattern)?,
            last_read,
        })
    }

    /// An `AsOf` over the subscription control field of `dataset`.
    pub fn for_dataset(dataset: &Dataset, last_read: DateTime<Utc>) -> Result<Self, Error> {
        match &dataset.subscription_control_field {
            Some(field) if dataset.is_subscribable() => AsOf::new(
                field.trim(),
                dataset.subscription_control_field_pattern.as_deref(),
                last_read,
            ),
            _ => Err(Error::SubscriptionUnsupported(dataset.identity())),
        }
    }

    pub fn last_read(&self) -> DateTime<Utc> {
        self.last_read
    }

    /// `where_clause` restricted to records changed since the last read.
    /// The next call compares against the time of this one.
    pub fn apply(&mut self, where_clause: Option<&str>) -> String {
        let predicate = format!("{} > {}", self.field, self.formatter.format(self.last_read));
        self.last_read = Utc::now();

        tracing::info!(predicate = %predicate, "Derived asOf predicate");
        match where_clause.map(str::trim) {
            Some(base) if !base.is_empty() => format!("{base} and {predicate}"),
            _ => predicate,
        }
    }
}
