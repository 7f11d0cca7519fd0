//! Transient state used by the gateway.
//!
//! This is initialized on startup.

use std::sync::Arc;

use dragoman_configuration::Configuration;
use query_engine_execution::document_store::{DocumentStore, MongoDocumentStore};
use query_engine_execution::metrics;
use query_engine_execution::reader::Reader;
use query_engine_execution::repository::{DocumentStoreRepository, HttpRepository, Repository};
use query_engine_execution::router::{CacheSettings, RepositoryRouter};
use thiserror::Error;
use tracing::{info_span, Instrument};

/// State for the gateway.
#[derive(Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
    pub reader: Arc<Reader>,
}

/// Create the document-store client and wire every repository behind a
/// router.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let store = MongoDocumentStore::connect(
        &configuration.connection_uri,
        configuration.app_name.clone(),
    )
    .instrument(info_span!("Create document store client"))
    .await
    .map_err(InitializationError::UnableToCreateClient)?;

    create_state_with_store(configuration, metrics_registry, Arc::new(store)).await
}

/// As `create_state`, reading documents from `store`.
pub async fn create_state_with_store(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
    store: Arc<dyn DocumentStore>,
) -> Result<State, InitializationError> {
    let metrics = async {
        let metrics_inner = metrics::Metrics::initialize(metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        Ok(metrics_inner)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    let client = reqwest::Client::builder()
        .timeout(configuration.http_timeout)
        .user_agent(configuration.user_agent.clone())
        .build()
        .map_err(InitializationError::UnableToCreateHttpClient)?;

    let repositories: Vec<Arc<dyn Repository>> = vec![
        Arc::new(HttpRepository::new(client, metrics.clone())),
        Arc::new(DocumentStoreRepository::new(store, metrics.clone())),
    ];
    let router = RepositoryRouter::new(
        repositories,
        CacheSettings {
            capacity: configuration.cache_capacity,
            time_to_live: configuration.cache_expiry,
        },
    );

    Ok(State {
        reader: Arc::new(Reader::new(router, metrics.clone())),
        metrics,
    })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to create document store client: {0}")]
    UnableToCreateClient(mongodb::error::Error),
    #[error("unable to create HTTP client: {0}")]
    UnableToCreateHttpClient(reqwest::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
