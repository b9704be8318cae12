//! Shared application state.
//!
//! Both services are process-wide: constructed once at startup, shared by
//! every in-flight request, and torn down with the process. Nothing in here
//! is a bare global; every collaborator is injected so tests can substitute
//! doubles.

use std::sync::Arc;

use foretick_core::{HttpClient, NoopCache, PredictionCache, ReqwestHttpClient, SeriesProvider};
use foretick_model::FsModelStore;

use crate::config::ServeConfig;
use crate::predict::PredictionService;
use crate::quotes::QuoteService;
use crate::redis_cache::RedisCache;
use crate::yahoo::YahooSeriesProvider;

#[derive(Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionService>,
    pub quotes: Arc<QuoteService>,
}

impl AppState {
    pub fn new(predictions: PredictionService, quotes: QuoteService) -> Self {
        Self {
            predictions: Arc::new(predictions),
            quotes: Arc::new(quotes),
        }
    }

    /// Assemble production collaborators from configuration.
    ///
    /// An unreachable Redis backend downgrades to the no-op cache rather
    /// than failing startup; the service then computes every request
    /// directly until the backend returns.
    pub async fn from_config(config: &ServeConfig) -> Self {
        let cache: Arc<dyn PredictionCache> = match &config.redis_url {
            Some(url) => match RedisCache::connect(url).await {
                Ok(cache) => Arc::new(cache),
                Err(error) => {
                    tracing::warn!(%error, "redis unreachable at startup; serving without durable cache");
                    Arc::new(NoopCache)
                }
            },
            None => {
                tracing::info!("no redis url configured; serving without durable cache");
                Arc::new(NoopCache)
            }
        };

        let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
        let provider: Arc<dyn SeriesProvider> = Arc::new(YahooSeriesProvider::new(http));
        let models = Arc::new(FsModelStore::new(&config.artifact_dir));

        Self::new(
            PredictionService::new(models, provider.clone(), cache),
            QuoteService::new(provider, config.quote_batch_timeout),
        )
    }
}
