use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tokio::time::Instant;
use tracing::{debug, warn};

use inbox_feed::{Feed, refine};
use inbox_types::api::{ConversationViewModel, CountsSummary, FeedTab};

use crate::error::FeedError;

/// How long a fetched page counts as fresh.
pub const DEFAULT_FRESH_FOR: Duration = Duration::from_secs(5);

/// Generation handed out when a request is issued. Later requests get
/// higher generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response replaced the visible feed.
    Applied,
    /// A later request already landed; the response was dropped.
    Discarded,
    /// The fetch failed; the previous feed is still shown.
    Unavailable,
}

/// One successfully fetched page. Items and counts are always replaced together.
#[derive(Debug)]
pub struct Snapshot {
    pub feed: Feed,
    pub generation: u64,
    pub fetched_at: Instant,
}

/// What a consumer renders: a refined tab plus the state of the feed.
#[derive(Debug, Clone)]
pub struct FeedView {
    pub items: Vec<ConversationViewModel>,
    pub counts: CountsSummary,
    /// Set while the most recent fetch has failed.
    pub error: Option<Arc<FeedError>>,
    /// False until the first successful fetch.
    pub loaded: bool,
    pub fresh: bool,
}

#[derive(Default)]
struct CacheState {
    snapshot: Option<Arc<Snapshot>>,
    last_error: Option<Arc<FeedError>>,
    applied: u64,
    error_generation: u64,
}

/// Stale-while-revalidate cache for one feed query.
pub struct FeedCache {
    issued: AtomicU64,
    state: RwLock<CacheState>,
    updates: watch::Sender<u64>,
    fresh_for: Duration,
}

impl Default for FeedCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedCache {
    pub fn new() -> Self {
        Self::with_fresh_for(DEFAULT_FRESH_FOR)
    }

    pub fn with_fresh_for(fresh_for: Duration) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            issued: AtomicU64::new(0),
            state: RwLock::new(CacheState::default()),
            updates,
            fresh_for,
        }
    }

    /// Issue a ticket for a request that is about to be sent.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Record the result of a ticketed request.
    ///
    /// A response is dropped if a request issued after it has already been
    /// applied. Failures never clear the current snapshot.
    pub async fn complete(&self, ticket: Ticket, result: Result<Feed, FeedError>) -> Outcome {
        let mut state = self.state.write().await;

        if ticket.0 <= state.applied {
            debug!(
                generation = ticket.0,
                applied = state.applied,
                "Discarding out-of-order feed response"
            );
            return Outcome::Discarded;
        }

        let outcome = match result {
            Ok(feed) => {
                state.snapshot = Some(Arc::new(Snapshot {
                    feed,
                    generation: ticket.0,
                    fetched_at: Instant::now(),
                }));
                state.applied = ticket.0;
                if ticket.0 >= state.error_generation {
                    state.last_error = None;
                }
                Outcome::Applied
            }
            Err(e) => {
                warn!(generation = ticket.0, "Feed unavailable: {}", e);
                if ticket.0 >= state.error_generation {
                    state.last_error = Some(Arc::new(e));
                    state.error_generation = ticket.0;
                }
                Outcome::Unavailable
            }
        };

        self.updates.send_replace(ticket.0);
        outcome
    }

    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.read().await.snapshot.clone()
    }

    /// Refined items and counts for a tab, read from one consistent snapshot.
    pub async fn view(&self, tab: FeedTab) -> FeedView {
        let state = self.state.read().await;
        match &state.snapshot {
            Some(snapshot) => FeedView {
                items: refine(&snapshot.feed.items, tab),
                counts: snapshot.feed.counts,
                error: state.last_error.clone(),
                loaded: true,
                fresh: snapshot.fetched_at.elapsed() < self.fresh_for,
            },
            None => FeedView {
                items: Vec::new(),
                counts: CountsSummary::default(),
                error: state.last_error.clone(),
                loaded: false,
                fresh: false,
            },
        }
    }

    /// Notified with the ticket generation each time a request completes
    /// (applied or failed).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }
}
