use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use inbox_types::api::ConversationQuery;

use crate::cache::{FeedCache, Outcome};
use crate::fetch::FeedClient;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub interval: Duration,
    pub enabled: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            enabled: true,
        }
    }
}

/// Re-fetches one feed query on a fixed interval into a shared cache.
///
/// `refresh` can also be called directly (manual refresh) while the loop is
/// running; the cache sorts out which response wins.
#[derive(Clone)]
pub struct FeedPoller {
    client: FeedClient,
    cache: Arc<FeedCache>,
    query: ConversationQuery,
    config: PollerConfig,
}

impl FeedPoller {
    pub fn new(client: FeedClient, query: ConversationQuery) -> Self {
        Self {
            client,
            cache: Arc::new(FeedCache::new()),
            query,
            config: PollerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache(&self) -> &Arc<FeedCache> {
        &self.cache
    }

    /// Fetch once and hand the result to the cache.
    pub async fn refresh(&self) -> Outcome {
        let ticket = self.cache.begin();
        let result = self.client.fetch(&self.query).await;
        let outcome = self.cache.complete(ticket, result).await;
        debug!(generation = ticket.generation(), ?outcome, "Feed refresh finished");
        outcome
    }

    /// Poll until `shutdown` resolves. The first fetch happens immediately,
    /// and shutdown also cuts short a fetch that is still waiting on the server.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        if !self.config.enabled {
            info!("Feed polling disabled");
            return;
        }

        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!("Polling conversation feed every {:?}", self.config.interval);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    // An in-flight fetch is dropped on shutdown; its ticket never completes.
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = self.refresh() => {}
                    }
                }
            }
        }
        info!("Feed polling stopped");
    }
}
