use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open/closed state of an inbox conversation as stored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InboxStatus {
    Open,
    Closed,
}

impl InboxStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Who is driving the conversation right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationMode {
    Bot,
    Human,
}

impl ConversationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Human => "human",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bot" => Some(Self::Bot),
            "human" => Some(Self::Human),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAgent {
    pub id: String,
    pub name: String,
}

/// A conversation as handed over by the store, already joined with its
/// contact and AI agent.
///
/// `created_at` is always set by the store. It is optional here only so a
/// malformed row can still travel through the feed instead of being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConversation {
    pub id: String,
    pub phone: String,
    pub status: InboxStatus,
    pub mode: ConversationMode,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub handoff_summary: Option<String>,
    #[serde(default)]
    pub last_message_preview: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub ai_agent: Option<AiAgent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_values() {
        assert_eq!(InboxStatus::parse("closed"), Some(InboxStatus::Closed));
        assert_eq!(ConversationMode::parse("human"), Some(ConversationMode::Human));
        assert_eq!(Priority::parse("urgent"), Some(Priority::Urgent));
        assert_eq!(InboxStatus::parse("archived"), None);
        assert_eq!(Priority::parse("URGENT"), None);
    }

    #[test]
    fn raw_conversation_from_minimal_json() {
        let raw: RawConversation = serde_json::from_str(
            r#"{"id":"c1","phone":"+5511999998888","status":"open","mode":"bot"}"#,
        )
        .unwrap();

        assert_eq!(raw.priority, Priority::Normal);
        assert_eq!(raw.unread_count, 0);
        assert!(raw.created_at.is_none());
        assert!(raw.contact.is_none());
    }
}
