use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::InboxStatus;

// -- Conversation status --

/// Lifecycle state shown in the mini-app, derived from a raw conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    AiActive,
    HumanActive,
    HandoffRequested,
    Resolved,
}

impl ConversationStatus {
    pub const ALL: [ConversationStatus; 4] = [
        ConversationStatus::AiActive,
        ConversationStatus::HumanActive,
        ConversationStatus::HandoffRequested,
        ConversationStatus::Resolved,
    ];
}

// -- Feed --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationViewModel {
    pub id: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_avatar: Option<String>,
    pub status: ConversationStatus,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_typing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_agent_name: Option<String>,
}

/// Per-status counts for one page of the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountsSummary {
    pub total: usize,
    pub resolved: usize,
    pub handoff_requested: usize,
    pub human_active: usize,
    pub ai_active: usize,
}

impl CountsSummary {
    pub fn get(&self, status: ConversationStatus) -> usize {
        match status {
            ConversationStatus::AiActive => self.ai_active,
            ConversationStatus::HumanActive => self.human_active,
            ConversationStatus::HandoffRequested => self.handoff_requested,
            ConversationStatus::Resolved => self.resolved,
        }
    }

    pub fn increment(&mut self, status: ConversationStatus) {
        let slot = match status {
            ConversationStatus::AiActive => &mut self.ai_active,
            ConversationStatus::HumanActive => &mut self.human_active,
            ConversationStatus::HandoffRequested => &mut self.handoff_requested,
            ConversationStatus::Resolved => &mut self.resolved,
        };
        *slot += 1;
        self.total += 1;
    }

    /// Badge count for a mini-app tab.
    pub fn for_tab(&self, tab: FeedTab) -> usize {
        match tab.status() {
            Some(status) => self.get(status),
            None => self.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    pub conversations: Vec<ConversationViewModel>,
    pub counts: CountsSummary,
}

// -- Tabs --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTab {
    #[default]
    All,
    Urgent,
    Ai,
    Human,
}

impl FeedTab {
    pub const ALL: [FeedTab; 4] = [FeedTab::All, FeedTab::Urgent, FeedTab::Ai, FeedTab::Human];

    /// The single status a tab narrows to, `None` for the unfiltered tab.
    pub fn status(self) -> Option<ConversationStatus> {
        match self {
            Self::All => None,
            Self::Urgent => Some(ConversationStatus::HandoffRequested),
            Self::Ai => Some(ConversationStatus::AiActive),
            Self::Human => Some(ConversationStatus::HumanActive),
        }
    }

    pub fn matches(self, status: ConversationStatus) -> bool {
        self.status().is_none_or(|s| s == status)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "urgent" => Some(Self::Urgent),
            "ai" => Some(Self::Ai),
            "human" => Some(Self::Human),
            _ => None,
        }
    }
}

// -- Query --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 200;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for ConversationQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ConversationQuery {
    pub fn open() -> Self {
        Self {
            status: Some(InboxStatus::Open.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Anything other than `open` or `closed` means no status filter.
    pub fn status_filter(&self) -> Option<InboxStatus> {
        self.status.as_deref().and_then(InboxStatus::parse)
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

// -- Errors --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_status_and_total() {
        let mut counts = CountsSummary::default();
        counts.increment(ConversationStatus::Resolved);
        counts.increment(ConversationStatus::HandoffRequested);
        counts.increment(ConversationStatus::HandoffRequested);

        assert_eq!(counts.total, 3);
        assert_eq!(counts.for_tab(FeedTab::All), 3);
        assert_eq!(counts.for_tab(FeedTab::Urgent), 2);
        assert_eq!(counts.for_tab(FeedTab::Ai), 0);
        assert_eq!(counts.get(ConversationStatus::Resolved), 1);
    }

    #[test]
    fn query_defaults_and_filters() {
        let q: ConversationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, DEFAULT_LIMIT);
        assert_eq!(q.status_filter(), None);

        let q = ConversationQuery {
            status: Some("pending".into()),
            search: Some("   ".into()),
            limit: 5000,
        };
        assert_eq!(q.status_filter(), None);
        assert_eq!(q.search_term(), None);
        assert_eq!(q.effective_limit(), MAX_LIMIT);
    }

    #[test]
    fn view_model_uses_camel_case_and_omits_absent_fields() {
        let vm = ConversationViewModel {
            id: "c1".into(),
            contact_name: "Ana".into(),
            contact_phone: "+5511999998888".into(),
            contact_avatar: None,
            status: ConversationStatus::HandoffRequested,
            last_message: "Oi".into(),
            last_message_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            unread_count: 2,
            is_typing: None,
            ai_agent_name: None,
        };

        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["contactName"], "Ana");
        assert_eq!(json["status"], "handoff_requested");
        assert_eq!(json["lastMessageAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("aiAgentName").is_none());
        assert!(json.get("contactAvatar").is_none());
    }

    #[test]
    fn tab_matching() {
        assert!(FeedTab::All.matches(ConversationStatus::Resolved));
        assert!(FeedTab::Human.matches(ConversationStatus::HumanActive));
        assert!(!FeedTab::Urgent.matches(ConversationStatus::AiActive));
        assert_eq!(FeedTab::parse("ai"), Some(FeedTab::Ai));
        assert_eq!(FeedTab::parse("bogus"), None);
    }
}
