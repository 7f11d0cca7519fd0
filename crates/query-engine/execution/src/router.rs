//! Choose the repository that answers for a dataset.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use query_engine_metadata::metadata::Dataset;

use crate::error::Error;
use crate::repository::Repository;

/// Bounds of the routing cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Most datasets remembered at once. Zero disables caching.
    pub capacity: usize,
    /// How long a routing decision is remembered.
    pub time_to_live: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            capacity: 100,
            time_to_live: Duration::from_secs(600),
        }
    }
}

struct CachedRoute {
    repository: Arc<dyn Repository>,
    inserted: Instant,
}

/// A bounded, expiring memo of routing decisions that any number of callers
/// can share. Only successful decisions are remembered.
pub struct RoutingCache {
    settings: CacheSettings,
    entries: DashMap<Dataset, CachedRoute>,
}

impl RoutingCache {
    pub fn new(settings: CacheSettings) -> Self {
        RoutingCache {
            settings,
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cached repository for `dataset`, or the one `load` chooses.
    ///
    /// Two callers missing on the same key at once may both run `load`, they
    /// still end up sharing the same repository.
    pub fn get_or_try_insert_with<F>(
        &self,
        dataset: &Dataset,
        load: F,
    ) -> Result<Arc<dyn Repository>, Error>
    where
        F: FnOnce() -> Result<Arc<dyn Repository>, Error>,
    {
        if let Some(repository) = self.get(dataset) {
            return Ok(repository);
        }

        let repository = load()?;
        if self.settings.capacity > 0 {
            self.make_room();
            self.entries.insert(
                dataset.clone(),
                CachedRoute {
                    repository: Arc::clone(&repository),
                    inserted: Instant::now(),
                },
            );
        }
        Ok(repository)
    }

    fn get(&self, dataset: &Dataset) -> Option<Arc<dyn Repository>> {
        let live = {
            let entry = self.entries.get(dataset)?;
            if entry.inserted.elapsed() < self.settings.time_to_live {
                Some(Arc::clone(&entry.repository))
            } else {
                None
            }
        };
        if live.is_none() {
            self.entries.remove(dataset);
        }
        live
    }

    /// Drop expired entries, then the oldest ones, until one more fits.
    fn make_room(&self) {
        let time_to_live = self.settings.time_to_live;
        self.entries
            .retain(|_, route| route.inserted.elapsed() < time_to_live);

        while self.entries.len() >= self.settings.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().inserted)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(dataset) => {
                    self.entries.remove(&dataset);
                }
                None => break,
            }
        }
    }
}

/// Routes each dataset to the single repository that claims it.
pub struct RepositoryRouter {
    repositories: Vec<Arc<dyn Repository>>,
    cache: RoutingCache,
}

impl RepositoryRouter {
    pub fn new(repositories: Vec<Arc<dyn Repository>>, settings: CacheSettings) -> Self {
        RepositoryRouter {
            repositories,
            cache: RoutingCache::new(settings),
        }
    }

    pub fn route(&self, dataset: &Dataset) -> Result<Arc<dyn Repository>, Error> {
        self.cache
            .get_or_try_insert_with(dataset, || self.choose(dataset))
    }

    pub fn cache(&self) -> &RoutingCache {
        &self.cache
    }

    fn choose(&self, dataset: &Dataset) -> Result<Arc<dyn Repository>, Error> {
        let claimants: Vec<&Arc<dyn Repository>> = self
            .repositories
            .iter()
            .filter(|repository| repository.applies_to(dataset))
            .collect();

        match claimants.as_slice() {
            [] => {
                tracing::warn!(
                    dataset = %dataset.identity(),
                    source = %dataset.source,
                    "No repository exists for dataset"
                );
                Err(Error::NoRepositoryAvailable {
                    dataset_id: dataset.identity(),
                })
            }
            [repository] => {
                tracing::debug!(
                    dataset = %dataset.identity(),
                    repository = repository.name(),
                    "Routed dataset"
                );
                Ok(Arc::clone(repository))
            }
            several => Err(Error::AmbiguousRepository {
                dataset_id: dataset.identity(),
                repositories: several
                    .iter()
                    .map(|repository| repository.name().to_string())
                    .collect(),
            }),
        }
    }
}
