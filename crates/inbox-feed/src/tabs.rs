use std::cmp::Reverse;

use inbox_types::api::{ConversationStatus, ConversationViewModel, FeedTab};

/// Filter a feed down to one tab and order it for display.
pub fn refine(items: &[ConversationViewModel], tab: FeedTab) -> Vec<ConversationViewModel> {
    let mut filtered: Vec<ConversationViewModel> =
        items.iter().filter(|item| tab.matches(item.status)).cloned().collect();
    sort_for_display(&mut filtered);
    filtered
}

/// Handoff requests first, then most recent message first.
///
/// The sort is stable, so equal timestamps keep their incoming order.
pub fn sort_for_display(items: &mut [ConversationViewModel]) {
    items.sort_by_key(|item| {
        (
            item.status != ConversationStatus::HandoffRequested,
            Reverse(item.last_message_at),
        )
    });
}
