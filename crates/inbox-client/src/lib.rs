//! Polling client for the conversation feed.
//!
//! [`FeedClient`] fetches one page, [`FeedCache`] keeps the last good page
//! and drops out-of-order responses, [`FeedPoller`] ties them to a timer.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod poller;

pub use cache::{FeedCache, FeedView, Outcome, Snapshot, Ticket};
pub use error::FeedError;
pub use fetch::FeedClient;
pub use poller::{FeedPoller, PollerConfig};
