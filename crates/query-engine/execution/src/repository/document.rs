//! Find records in the document store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::{stream, StreamExt, TryStreamExt};
use query_engine_metadata::metadata::{Dataset, SourceKind, StorageCoordinates};
use query_engine_translation::translation::clause::{
    OrderByClauseParser, SelectClauseParser, WhereClauseParser,
};
use tracing::{info_span, Instrument};

use super::{limit, Repository};
use crate::document_store::{DocumentQuery, DocumentStore};
use crate::error::Error;
use crate::metrics::Metrics;
use crate::stream::{stop_after_error, RecordStream};

/// Answers queries for `<database>:<collection>` sources by compiling every
/// clause into a native query.
pub struct DocumentStoreRepository {
    store: Arc<dyn DocumentStore>,
    metrics: Metrics,
}

impl DocumentStoreRepository {
    pub fn new(store: Arc<dyn DocumentStore>, metrics: Metrics) -> Self {
        DocumentStoreRepository { store, metrics }
    }
}

/// Time between successive splits.
struct Stopwatch {
    started: Instant,
    last_split: Instant,
}

impl Stopwatch {
    fn start() -> Self {
        let now = Instant::now();
        Stopwatch {
            started: now,
            last_split: now,
        }
    }

    fn split(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last_split;
        self.last_split = now;
        elapsed
    }

    fn total(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Repository for DocumentStoreRepository {
    fn name(&self) -> &str {
        "document-store"
    }

    fn applies_to(&self, dataset: &Dataset) -> bool {
        dataset.source_kind() == Some(SourceKind::DocumentStore)
    }

    fn find(
        &self,
        dataset: &Dataset,
        select: Option<&str>,
        where_clause: Option<&str>,
        order_by: Option<&str>,
        max_results: i64,
    ) -> Result<RecordStream, Error> {
        let coordinates = StorageCoordinates::parse(&dataset.source)?;

        let mut stopwatch = Stopwatch::start();
        let projection = SelectClauseParser.document(select)?;
        let projection_elapsed = stopwatch.split();
        let filter = WhereClauseParser.document(where_clause)?;
        let predicate_elapsed = stopwatch.split();
        let sort = OrderByClauseParser.document(order_by)?;
        let order_by_elapsed = stopwatch.split();

        self.metrics
            .observe_clause_compile("select", projection_elapsed);
        self.metrics
            .observe_clause_compile("where", predicate_elapsed);
        self.metrics
            .observe_clause_compile("order by", order_by_elapsed);

        let query = DocumentQuery {
            filter,
            projection,
            sort: (!sort.is_empty()).then_some(sort),
            limit: limit(max_results),
        };

        tracing::debug!(
            source = %coordinates,
            filter = %query.filter,
            projection = %query.projection,
            sort = ?query.sort,
            limit = ?query.limit,
            "Compiled document query"
        );

        let store = Arc::clone(&self.store);
        let metrics = self.metrics.clone();
        let span = info_span!("Find documents", source = %coordinates);
        let records = async move {
            let found = store.find(&coordinates, query).await;
            let find_elapsed = stopwatch.split();
            metrics.record_document_query();
            tracing::info!(
                "Total elapsed time for find call={}ms (projection={}ms, predicate={}ms, orderBy={}ms, find={}ms)",
                stopwatch.total().as_millis(),
                projection_elapsed.as_millis(),
                predicate_elapsed.as_millis(),
                order_by_elapsed.as_millis(),
                find_elapsed.as_millis(),
            );
            found
        }
        .instrument(span);

        Ok(stop_after_error(stream::once(records).try_flatten()).boxed())
    }
}
