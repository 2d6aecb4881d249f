//! Conversation feed for the Telegram mini-app.
//!
//! Raw inbox conversations go in; classified, counted view-models come out.
//! Everything here is synchronous and side-effect free apart from logging.

pub mod feed;
pub mod format;
pub mod presentation;
pub mod status;
pub mod tabs;

pub use feed::{Feed, build_feed, build_feed_at, transform, transform_at};
pub use format::{format_phone, format_relative_time, format_relative_time_now};
pub use status::classify;
pub use tabs::refine;

#[cfg(test)]
mod fixtures;
