use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::info;

use inbox_types::models::{ConversationMode, InboxStatus, Priority};

use crate::Database;
use crate::models::NewConversation;

impl Database {
    /// Insert a handful of demo conversations covering every feed status.
    /// Does nothing if the inbox already has conversations.
    pub fn seed_demo(&self) -> Result<usize> {
        if self.count_conversations()? > 0 {
            return Ok(0);
        }

        let agent = self.create_ai_agent("Sofia")?;
        let now = Utc::now();
        let mut inserted = 0;

        let ana = self.create_contact(Some("Ana Lima"), "+5511987654321")?;
        let mut c = NewConversation::new("+5511987654321");
        c.contact_id = Some(ana);
        c.ai_agent_id = Some(agent.clone());
        c.priority = Priority::Urgent;
        c.last_message_preview = Some("Quero falar com um atendente".into());
        c.last_message_at = Some(now - Duration::minutes(3));
        c.unread_count = 2;
        self.insert_conversation(&c)?;
        inserted += 1;

        let mut c = NewConversation::new("+5521912345678");
        c.ai_agent_id = Some(agent.clone());
        c.handoff_summary = Some("Cliente pediu segunda via do boleto".into());
        c.last_message_preview = Some("Pode me mandar o boleto?".into());
        c.last_message_at = Some(now - Duration::hours(2));
        c.unread_count = 1;
        self.insert_conversation(&c)?;
        inserted += 1;

        let bruno = self.create_contact(Some("Bruno Costa"), "+5531998877665")?;
        let mut c = NewConversation::new("+5531998877665");
        c.contact_id = Some(bruno);
        c.mode = ConversationMode::Human;
        c.last_message_preview = Some("Obrigado pela ajuda!".into());
        c.last_message_at = Some(now - Duration::minutes(25));
        self.insert_conversation(&c)?;
        inserted += 1;

        let mut c = NewConversation::new("+5541991112222");
        c.ai_agent_id = Some(agent);
        c.last_message_preview = Some("Qual o horário de funcionamento?".into());
        c.last_message_at = Some(now - Duration::days(1));
        self.insert_conversation(&c)?;
        inserted += 1;

        let mut c = NewConversation::new("+5551993334444");
        c.status = InboxStatus::Closed;
        c.last_message_at = Some(now - Duration::days(9));
        self.insert_conversation(&c)?;
        inserted += 1;

        info!("Seeded {} demo conversations", inserted);
        Ok(inserted)
    }
}
