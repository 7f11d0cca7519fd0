//! The read entry point.

use chrono::{DateTime, Utc};
use futures::{StreamExt, TryStreamExt};
use query_engine_execution::reader::EnvelopeStream;
use query_engine_metadata::metadata::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::State;
use crate::subscription::{self, AsOf};

/// One read of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRequest {
    pub dataset: Dataset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Zero or less reads everything.
    #[serde(default)]
    pub max_results: i64,
    /// Only read records whose control field is later than this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

impl ReadRequest {
    pub fn new(dataset: Dataset) -> Self {
        ReadRequest {
            dataset,
            select: None,
            where_clause: None,
            order_by: None,
            max_results: 0,
            since: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Subscription(#[from] subscription::Error),
    #[error(transparent)]
    Execution(#[from] query_engine_execution::error::Error),
}

/// Read the dataset named by `request`, wrapping every record in an
/// envelope. Failures are logged on the way out, including those that
/// arrive through the stream.
pub fn read(state: &State, request: &ReadRequest) -> Result<EnvelopeStream, ReadError> {
    match plan(state, request) {
        Ok(envelopes) => Ok(envelopes.inspect_err(|err| log_read_error(err)).boxed()),
        Err(err) => {
            log_read_error(&err);
            Err(err)
        }
    }
}

fn plan(state: &State, request: &ReadRequest) -> Result<EnvelopeStream, ReadError> {
    let where_clause = match request.since {
        Some(since) => {
            let mut as_of = AsOf::for_dataset(&request.dataset, since)?;
            Some(as_of.apply(request.where_clause.as_deref()))
        }
        None => request.where_clause.clone(),
    };

    Ok(state.reader.read(
        &request.dataset,
        request.select.as_deref(),
        where_clause.as_deref(),
        request.order_by.as_deref(),
        request.max_results,
    )?)
}

fn log_read_error(err: &dyn std::fmt::Display) {
    tracing::error!(
        meta.signal_type = "log",
        event.domain = "dragoman",
        event.name = "Read error",
        name = "Read error",
        body = %err,
        error = true,
    );
}
