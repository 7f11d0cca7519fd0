//! Find records behind an HTTP URL.
//!
//! The whole payload is fetched before any filtering happens.

use std::borrow::Cow;

use futures::{future, stream, StreamExt, TryStreamExt};
use query_engine_metadata::metadata::{Dataset, Record, SourceKind};
use query_engine_translation::translation::clause::{SelectClauseParser, WhereClauseParser};
use tracing::{info_span, Instrument};

use super::{limit, Repository};
use crate::error::Error;
use crate::metrics::Metrics;
use crate::stream::{stop_after_error, RecordStream};

/// Answers queries for URL sources by filtering and projecting the fetched
/// records in process.
pub struct HttpRepository {
    client: reqwest::Client,
    metrics: Metrics,
}

impl HttpRepository {
    pub fn new(client: reqwest::Client, metrics: Metrics) -> Self {
        HttpRepository { client, metrics }
    }
}

impl Repository for HttpRepository {
    fn name(&self) -> &str {
        "http"
    }

    fn applies_to(&self, dataset: &Dataset) -> bool {
        dataset.source_kind() == Some(SourceKind::Http)
    }

    fn find(
        &self,
        dataset: &Dataset,
        select: Option<&str>,
        where_clause: Option<&str>,
        order_by: Option<&str>,
        max_results: i64,
    ) -> Result<RecordStream, Error> {
        let projector = SelectClauseParser.projector(select)?;
        let filter = WhereClauseParser.filter(where_clause)?;

        if order_by.is_some_and(|clause| !clause.trim().is_empty()) {
            tracing::warn!(
                source = %dataset.source,
                order_by,
                "Ignoring order by for an HTTP source"
            );
        }

        let url = dataset.source.clone();
        let span = info_span!("Fetch records", url = %url);
        let fetched = fetch_records(self.client.clone(), self.metrics.clone(), url).instrument(span);

        let records = stream::once(fetched)
            .map_ok(|records| stream::iter(records.into_iter().map(Ok::<_, Error>)))
            .try_flatten()
            .try_filter(move |record| future::ready(filter.matches(record)));

        let limited = match limit(max_results).and_then(|n| usize::try_from(n).ok()) {
            Some(n) => records.take(n).boxed(),
            None => records.boxed(),
        };

        Ok(stop_after_error(limited.map_ok(move |record| projector.project(record))).boxed())
    }
}

async fn fetch_records(
    client: reqwest::Client,
    metrics: Metrics,
    url: String,
) -> Result<Vec<Record>, Error> {
    metrics.record_http_fetch();

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(source) => return Err(Error::HttpRequest { url, source }),
    };

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus { url, status });
    }

    match response.text().await {
        Ok(body) => decode_records(&url, &body),
        Err(source) => Err(Error::HttpRequest { url, source }),
    }
}

/// Wrap a payload that is not already a JSON array into one. Blank payloads
/// are left alone.
pub fn normalize_payload(body: &str) -> Cow<'_, str> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('[') {
        Cow::Borrowed(body)
    } else {
        Cow::Owned(format!("[{trimmed}]"))
    }
}

/// Decode a payload into records. A blank payload holds no records.
pub fn decode_records(address: &str, body: &str) -> Result<Vec<Record>, Error> {
    let normalized = normalize_payload(body);
    if normalized.trim().is_empty() {
        return Ok(vec![]);
    }
    serde_json::from_str(&normalized).map_err(|source| Error::Decode {
        address: address.to_string(),
        source,
    })
}
