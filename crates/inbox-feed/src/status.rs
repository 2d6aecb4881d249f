use inbox_types::api::ConversationStatus;
use inbox_types::models::{ConversationMode, InboxStatus, Priority, RawConversation};

type Rule = (fn(&RawConversation) -> bool, ConversationStatus);

/// Classification rules, evaluated top to bottom. First match wins.
///
/// The order is load-bearing: a closed conversation is resolved whatever its
/// mode, and urgency only means "wants a human" while a bot is in charge.
const RULES: &[Rule] = &[
    (is_closed, ConversationStatus::Resolved),
    (is_urgent_bot, ConversationStatus::HandoffRequested),
    (is_bot_with_handoff_summary, ConversationStatus::HandoffRequested),
    (is_human, ConversationStatus::HumanActive),
];

const FALLBACK: ConversationStatus = ConversationStatus::AiActive;

/// Map a raw conversation onto the mini-app lifecycle state.
pub fn classify(conv: &RawConversation) -> ConversationStatus {
    RULES
        .iter()
        .find(|(applies, _)| applies(conv))
        .map(|&(_, status)| status)
        .unwrap_or(FALLBACK)
}

fn is_closed(conv: &RawConversation) -> bool {
    conv.status == InboxStatus::Closed
}

fn is_urgent_bot(conv: &RawConversation) -> bool {
    conv.mode == ConversationMode::Bot && conv.priority == Priority::Urgent
}

fn is_bot_with_handoff_summary(conv: &RawConversation) -> bool {
    conv.mode == ConversationMode::Bot
        && conv.handoff_summary.as_deref().is_some_and(|s| !s.is_empty())
}

fn is_human(conv: &RawConversation) -> bool {
    conv.mode == ConversationMode::Human
}
