use chrono::{DateTime, Utc};
use tracing::warn;

use inbox_types::api::{ConversationViewModel, CountsSummary, FeedResponse};
use inbox_types::models::RawConversation;

use crate::format::format_phone;
use crate::status::classify;

/// Preview shown for a conversation that has no messages yet.
pub const NO_MESSAGES: &str = "Sem mensagens";

/// One page of the feed: view-models plus the counts derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub items: Vec<ConversationViewModel>,
    pub counts: CountsSummary,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        FeedResponse {
            conversations: feed.items,
            counts: feed.counts,
        }
    }
}

impl From<FeedResponse> for Feed {
    fn from(resp: FeedResponse) -> Self {
        Feed {
            items: resp.conversations,
            counts: resp.counts,
        }
    }
}

pub fn transform(raw: &RawConversation) -> ConversationViewModel {
    transform_at(raw, Utc::now())
}

/// Build the display view-model for one conversation.
///
/// `now` is only consulted when a record carries neither `last_message_at`
/// nor `created_at`.
pub fn transform_at(raw: &RawConversation, now: DateTime<Utc>) -> ConversationViewModel {
    let contact_name = raw
        .contact
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format_phone(&raw.phone));

    let last_message = raw
        .last_message_preview
        .as_deref()
        .filter(|preview| !preview.is_empty())
        .unwrap_or(NO_MESSAGES)
        .to_string();

    let last_message_at = raw.last_message_at.or(raw.created_at).unwrap_or_else(|| {
        warn!("Conversation '{}' has no timestamps, using current time", raw.id);
        now
    });

    ConversationViewModel {
        id: raw.id.clone(),
        contact_name,
        contact_phone: raw.phone.clone(),
        contact_avatar: None,
        status: classify(raw),
        last_message,
        last_message_at,
        unread_count: raw.unread_count,
        is_typing: None,
        ai_agent_name: raw.ai_agent.as_ref().map(|agent| agent.name.clone()),
    }
}

pub fn build_feed(raw: &[RawConversation]) -> Feed {
    build_feed_at(raw, Utc::now())
}

/// Transform a page of conversations and count them by status.
pub fn build_feed_at(raw: &[RawConversation], now: DateTime<Utc>) -> Feed {
    let items: Vec<ConversationViewModel> = raw.iter().map(|conv| transform_at(conv, now)).collect();
    let counts = count(&items);
    Feed { items, counts }
}

pub fn count(items: &[ConversationViewModel]) -> CountsSummary {
    let mut counts = CountsSummary::default();
    for item in items {
        counts.increment(item.status);
    }
    counts
}
