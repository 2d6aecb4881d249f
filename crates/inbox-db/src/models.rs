//! Database row types. These map directly to SQLite rows and stay loosely
//! typed so one bad row cannot fail a whole page.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use inbox_types::models::{AiAgent, Contact, ConversationMode, InboxStatus, Priority, RawConversation};

#[derive(Debug, Clone, Default)]
pub struct ConversationRow {
    pub id: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub mode: Option<String>,
    pub priority: Option<String>,
    pub handoff_summary: Option<String>,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<String>,
    pub created_at: Option<String>,
    pub unread_count: Option<i64>,
    pub contact_id: Option<String>,
    pub contact_name: Option<String>,
    pub ai_agent_id: Option<String>,
    pub ai_agent_name: Option<String>,
}

impl ConversationRow {
    /// Decode into the feed's input record.
    ///
    /// Returns `None` (and logs) when the row has no id or an unknown
    /// status/mode. Bad timestamps and priorities degrade instead.
    pub fn into_raw(self) -> Option<RawConversation> {
        let Some(id) = self.id else {
            warn!("Skipping conversation row without id");
            return None;
        };

        let status = self.status.as_deref().and_then(InboxStatus::parse);
        let mode = self.mode.as_deref().and_then(ConversationMode::parse);
        let (Some(status), Some(mode)) = (status, mode) else {
            warn!(
                "Skipping conversation '{}': unknown status {:?} or mode {:?}",
                id, self.status, self.mode
            );
            return None;
        };

        let priority = match self.priority.as_deref() {
            None => Priority::Normal,
            Some(value) => Priority::parse(value).unwrap_or_else(|| {
                warn!("Unknown priority '{}' on conversation '{}'", value, id);
                Priority::Normal
            }),
        };

        let unread_count = self
            .unread_count
            .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0);

        let contact = self.contact_id.map(|contact_id| Contact {
            id: contact_id,
            name: self.contact_name,
        });
        let ai_agent = match (self.ai_agent_id, self.ai_agent_name) {
            (Some(agent_id), Some(name)) => Some(AiAgent { id: agent_id, name }),
            _ => None,
        };

        Some(RawConversation {
            last_message_at: parse_timestamp(&id, "last_message_at", self.last_message_at.as_deref()),
            created_at: parse_timestamp(&id, "created_at", self.created_at.as_deref()),
            phone: self.phone.unwrap_or_default(),
            id,
            status,
            mode,
            priority,
            handoff_summary: self.handoff_summary,
            last_message_preview: self.last_message_preview,
            unread_count,
            contact,
            ai_agent,
        })
    }
}

fn parse_timestamp(id: &str, column: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    value
        .parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') has no timezone. Treat it as UTC.
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| warn!("Corrupt {} '{}' on conversation '{}': {}", column, value, id, e))
        .ok()
}

/// Input for inserting a conversation.
#[derive(Debug, Clone)]
pub struct NewConversation {
    pub phone: String,
    pub contact_id: Option<String>,
    pub ai_agent_id: Option<String>,
    pub status: InboxStatus,
    pub mode: ConversationMode,
    pub priority: Priority,
    pub handoff_summary: Option<String>,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
}

impl NewConversation {
    pub fn new(phone: &str) -> Self {
        Self {
            phone: phone.to_string(),
            contact_id: None,
            ai_agent_id: None,
            status: InboxStatus::Open,
            mode: ConversationMode::Bot,
            priority: Priority::Normal,
            handoff_summary: None,
            last_message_preview: None,
            last_message_at: None,
            unread_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ConversationRow {
        ConversationRow {
            id: Some("c1".into()),
            phone: Some("+5511999998888".into()),
            status: Some("open".into()),
            mode: Some("bot".into()),
            priority: Some("urgent".into()),
            created_at: Some("2024-05-01 09:00:00".into()),
            unread_count: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_sqlite_and_rfc3339_timestamps() {
        let mut r = row();
        r.last_message_at = Some("2024-05-01T10:00:00Z".into());
        let raw = r.into_raw().unwrap();

        assert_eq!(raw.created_at, Some("2024-05-01T09:00:00Z".parse().unwrap()));
        assert_eq!(raw.last_message_at, Some("2024-05-01T10:00:00Z".parse().unwrap()));
        assert_eq!(raw.priority, Priority::Urgent);
        assert_eq!(raw.unread_count, 2);
    }

    #[test]
    fn corrupt_fields_degrade() {
        let mut r = row();
        r.created_at = Some("yesterday".into());
        r.priority = Some("critical".into());
        r.unread_count = Some(-4);
        let raw = r.into_raw().unwrap();

        assert!(raw.created_at.is_none());
        assert_eq!(raw.priority, Priority::Normal);
        assert_eq!(raw.unread_count, 0);
    }

    #[test]
    fn unknown_status_is_skipped() {
        let mut r = row();
        r.status = Some("archived".into());
        assert!(r.into_raw().is_none());

        let mut r = row();
        r.id = None;
        assert!(r.into_raw().is_none());
    }
}
