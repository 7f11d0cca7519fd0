//! Read a dataset through whichever repository claims it.

use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use query_engine_metadata::metadata::{Dataset, Record};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::metrics::Metrics;
use crate::router::RepositoryRouter;

/// A record tagged with the source it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope {
    pub source: String,
    pub payload: Record,
}

pub type EnvelopeStream = BoxStream<'static, Result<DataEnvelope, Error>>;

pub struct Reader {
    router: RepositoryRouter,
    metrics: Metrics,
}

impl Reader {
    pub fn new(router: RepositoryRouter, metrics: Metrics) -> Self {
        Reader { router, metrics }
    }

    /// Route `dataset`, run the query and wrap every record in an envelope.
    /// Routing and clause errors are returned straight away, backend errors
    /// arrive through the stream.
    pub fn read(
        &self,
        dataset: &Dataset,
        select: Option<&str>,
        where_clause: Option<&str>,
        order_by: Option<&str>,
        max_results: i64,
    ) -> Result<EnvelopeStream, Error> {
        let repository = self.router.route(dataset)?;
        let records = repository.find(dataset, select, where_clause, order_by, max_results)?;
        self.metrics.record_successful_read();

        let source = dataset.source.clone();
        Ok(records
            .map_ok(move |payload| DataEnvelope {
                source: source.clone(),
                payload,
            })
            .boxed())
    }
}
