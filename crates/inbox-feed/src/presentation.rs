use inbox_types::api::{ConversationStatus, FeedTab};

pub fn emoji(status: ConversationStatus) -> &'static str {
    match status {
        ConversationStatus::AiActive => "🤖",
        ConversationStatus::HumanActive => "👤",
        ConversationStatus::HandoffRequested => "🚨",
        ConversationStatus::Resolved => "✅",
    }
}

pub fn label(status: ConversationStatus) -> &'static str {
    match status {
        ConversationStatus::AiActive => "IA Ativo",
        ConversationStatus::HumanActive => "Humano",
        ConversationStatus::HandoffRequested => "Quer Humano",
        ConversationStatus::Resolved => "Resolvido",
    }
}

/// Copy shown when a tab has nothing to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub emoji: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn empty_state(tab: FeedTab) -> EmptyState {
    match tab {
        FeedTab::All => EmptyState {
            emoji: "💬",
            title: "Nenhuma conversa",
            description: "Suas conversas aparecerão aqui",
        },
        FeedTab::Urgent => EmptyState {
            emoji: "✨",
            title: "Nenhuma urgência",
            description: "Nenhum cliente pedindo atendente humano",
        },
        FeedTab::Ai => EmptyState {
            emoji: "🤖",
            title: "Nenhuma IA ativa",
            description: "Conversas com IA aparecerão aqui",
        },
        FeedTab::Human => EmptyState {
            emoji: "👤",
            title: "Nenhum atendimento",
            description: "Conversas com humanos aparecerão aqui",
        },
    }
}
