use chrono::{DateTime, Utc};
use inbox_types::models::{ConversationMode, InboxStatus, Priority, RawConversation};

pub fn at(ts: &str) -> DateTime<Utc> {
    ts.parse().unwrap()
}

pub fn raw(id: &str, status: InboxStatus, mode: ConversationMode) -> RawConversation {
    RawConversation {
        id: id.to_string(),
        phone: "+5511999998888".to_string(),
        status,
        mode,
        priority: Priority::Normal,
        handoff_summary: None,
        last_message_preview: None,
        last_message_at: None,
        created_at: Some(at("2024-05-01T09:00:00Z")),
        unread_count: 0,
        contact: None,
        ai_agent: None,
    }
}
