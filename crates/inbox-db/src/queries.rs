use anyhow::Result;
use rusqlite::{Connection, Row};
use tracing::warn;
use uuid::Uuid;

use inbox_types::models::{InboxStatus, RawConversation};

use crate::Database;
use crate::models::{ConversationRow, NewConversation};

/// Filters for the conversation feed query.
#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    pub status: Option<InboxStatus>,
    pub search: Option<String>,
    pub limit: u32,
}

impl Database {
    // -- Contacts / agents --

    pub fn create_contact(&self, name: Option<&str>, phone: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO contacts (id, name, phone) VALUES (?1, ?2, ?3)",
                (&id, name, phone),
            )?;
            Ok(())
        })?;
        Ok(id)
    }

    pub fn create_ai_agent(&self, name: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.with_conn(|conn| {
            conn.execute("INSERT INTO ai_agents (id, name) VALUES (?1, ?2)", (&id, name))?;
            Ok(())
        })?;
        Ok(id)
    }

    // -- Conversations --

    pub fn insert_conversation(&self, new: &NewConversation) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let last_message_at = new.last_message_at.map(|ts| ts.to_rfc3339());
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inbox_conversations
                    (id, phone, contact_id, ai_agent_id, status, mode, priority,
                     handoff_summary, last_message_preview, last_message_at, unread_count)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                rusqlite::params![
                    id,
                    new.phone,
                    new.contact_id,
                    new.ai_agent_id,
                    new.status.as_str(),
                    new.mode.as_str(),
                    new.priority.as_str(),
                    new.handoff_summary,
                    new.last_message_preview,
                    last_message_at,
                    new.unread_count,
                ],
            )?;
            Ok(())
        })?;
        Ok(id)
    }

    pub fn count_conversations(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 =
                conn.query_row("SELECT COUNT(*) FROM inbox_conversations", [], |row| row.get(0))?;
            Ok(n.max(0) as u64)
        })
    }

    /// Fetch one page of conversations joined with contact and AI agent,
    /// most recent activity first.
    ///
    /// Timestamps are compared as instants, so RFC3339 and SQLite's
    /// `YYYY-MM-DD HH:MM:SS` text sort together. Search ignores case on
    /// accented letters too.
    ///
    /// Rows that cannot be decoded are logged and left out of the page.
    pub fn list_conversations(&self, filter: &ConversationFilter) -> Result<Vec<RawConversation>> {
        let rows = self.with_conn(|conn| query_conversations(conn, filter))?;
        Ok(rows.into_iter().filter_map(ConversationRow::into_raw).collect())
    }
}

fn query_conversations(conn: &Connection, filter: &ConversationFilter) -> Result<Vec<ConversationRow>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.phone, c.status, c.mode, c.priority, c.handoff_summary,
                c.last_message_preview, c.last_message_at, c.created_at, c.unread_count,
                ct.id, ct.name, a.id, a.name
         FROM inbox_conversations c
         LEFT JOIN contacts ct ON c.contact_id = ct.id
         LEFT JOIN ai_agents a ON c.ai_agent_id = a.id
         WHERE (?1 IS NULL OR c.status = ?1)
           AND (?2 IS NULL
                OR c.phone LIKE ?2 ESCAPE '\\'
                OR inbox_fold(ct.name) LIKE ?2 ESCAPE '\\')
         ORDER BY julianday(c.last_message_at) IS NULL, julianday(c.last_message_at) DESC
         LIMIT ?3",
    )?;

    let status = filter.status.map(InboxStatus::as_str);
    let pattern = filter.search.as_deref().map(|term| like_pattern(&term.to_lowercase()));

    let rows = stmt
        .query_map(rusqlite::params![status, pattern, filter.limit], |row| {
            Ok(read_conversation_row(row))
        })?
        .filter_map(|decoded| match decoded {
            Ok(Ok(row)) => Some(row),
            Ok(Err(e)) => {
                warn!("Skipping undecodable conversation row: {}", e);
                None
            }
            Err(e) => {
                warn!("Skipping conversation row: {}", e);
                None
            }
        })
        .collect();

    Ok(rows)
}

fn read_conversation_row(row: &Row<'_>) -> rusqlite::Result<ConversationRow> {
    Ok(ConversationRow {
        id: row.get(0)?,
        phone: row.get(1)?,
        status: row.get(2)?,
        mode: row.get(3)?,
        priority: row.get(4)?,
        handoff_summary: row.get(5)?,
        last_message_preview: row.get(6)?,
        last_message_at: row.get(7)?,
        created_at: row.get(8)?,
        unread_count: row.get(9)?,
        contact_id: row.get(10)?,
        contact_name: row.get(11)?,
        ai_agent_id: row.get(12)?,
        ai_agent_name: row.get(13)?,
    })
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbox_types::models::{ConversationMode, Priority};

    fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
        s.parse().unwrap()
    }

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        let maria = db.create_contact(Some("Maria Souza"), "+5511999998888").unwrap();
        let agent = db.create_ai_agent("Sofia").unwrap();

        let mut c = NewConversation::new("+5511999998888");
        c.contact_id = Some(maria);
        c.ai_agent_id = Some(agent);
        c.last_message_at = Some(ts("2024-05-01T10:00:00Z"));
        c.last_message_preview = Some("Oi".into());
        db.insert_conversation(&c).unwrap();

        let mut c = NewConversation::new("+5521988887777");
        c.mode = ConversationMode::Human;
        c.last_message_at = Some(ts("2024-05-01T12:00:00Z"));
        db.insert_conversation(&c).unwrap();

        let mut c = NewConversation::new("+5531977776666");
        c.status = InboxStatus::Closed;
        c.priority = Priority::Urgent;
        db.insert_conversation(&c).unwrap();

        db
    }

    fn filter() -> ConversationFilter {
        ConversationFilter { limit: 50, ..Default::default() }
    }

    #[test]
    fn lists_joined_rows_newest_first_nulls_last() {
        let db = seeded();
        let rows = db.list_conversations(&filter()).unwrap();

        let phones: Vec<&str> = rows.iter().map(|r| r.phone.as_str()).collect();
        assert_eq!(phones, ["+5521988887777", "+5511999998888", "+5531977776666"]);

        let maria = &rows[1];
        assert_eq!(maria.contact.as_ref().and_then(|c| c.name.as_deref()), Some("Maria Souza"));
        assert_eq!(maria.ai_agent.as_ref().map(|a| a.name.as_str()), Some("Sofia"));
        assert!(rows[2].created_at.is_some());
    }

    #[test]
    fn filters_by_status() {
        let db = seeded();
        let open = db
            .list_conversations(&ConversationFilter { status: Some(InboxStatus::Open), ..filter() })
            .unwrap();
        assert_eq!(open.len(), 2);

        let closed = db
            .list_conversations(&ConversationFilter { status: Some(InboxStatus::Closed), ..filter() })
            .unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].priority, Priority::Urgent);
    }

    #[test]
    fn search_matches_phone_or_contact_name() {
        let db = seeded();
        let by_name = db
            .list_conversations(&ConversationFilter { search: Some("maria".into()), ..filter() })
            .unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].phone, "+5511999998888");

        let by_phone = db
            .list_conversations(&ConversationFilter { search: Some("8887777".into()), ..filter() })
            .unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].phone, "+5521988887777");

        let wildcard = db
            .list_conversations(&ConversationFilter { search: Some("%".into()), ..filter() })
            .unwrap();
        assert!(wildcard.is_empty());
    }

    #[test]
    fn search_ignores_case_on_accented_names() {
        let db = seeded();
        let julia = db.create_contact(Some("Júlia Araújo"), "+5511955554444").unwrap();
        let mut c = NewConversation::new("+5511955554444");
        c.contact_id = Some(julia);
        db.insert_conversation(&c).unwrap();

        for term in ["JÚLIA", "araújo", "júlia ARAÚJO"] {
            let rows = db
                .list_conversations(&ConversationFilter { search: Some(term.into()), ..filter() })
                .unwrap();
            assert_eq!(rows.len(), 1, "search {term:?}");
            assert_eq!(rows[0].phone, "+5511955554444");
        }
    }

    #[test]
    fn orders_by_instant_across_timestamp_formats() {
        let db = Database::open_in_memory().unwrap();
        let mut c = NewConversation::new("+5511911110000");
        c.last_message_at = Some(ts("2024-05-01T11:00:00Z"));
        db.insert_conversation(&c).unwrap();

        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inbox_conversations (id, phone, status, mode, last_message_at)
                 VALUES ('naive', '+5511933330000', 'open', 'bot', '2024-05-01 12:00:00'),
                        ('offset', '+5511922220000', 'open', 'bot', '2024-05-01T13:30:00-03:00')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let rows = db.list_conversations(&filter()).unwrap();
        let phones: Vec<&str> = rows.iter().map(|r| r.phone.as_str()).collect();
        // 13:30-03:00 is 16:30Z
        assert_eq!(phones, ["+5511922220000", "+5511933330000", "+5511911110000"]);

        let top = db
            .list_conversations(&ConversationFilter { limit: 2, ..Default::default() })
            .unwrap();
        assert_eq!(top[1].id, "naive");
    }

    #[test]
    fn respects_limit() {
        let db = seeded();
        let rows = db
            .list_conversations(&ConversationFilter { limit: 1, ..Default::default() })
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let db = seeded();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inbox_conversations (id, phone, status, mode) VALUES ('bad', '1', 'archived', 'bot')",
                [],
            )?;
            conn.execute(
                "INSERT INTO inbox_conversations (id, phone, status, mode, created_at)
                 VALUES ('odd', '2', 'open', 'bot', 'not a date')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let rows = db.list_conversations(&filter()).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.id != "bad"));
        let odd = rows.iter().find(|r| r.id == "odd").unwrap();
        assert!(odd.created_at.is_none());
        assert_eq!(db.count_conversations().unwrap(), 5);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ab"), "%ab%");
        assert_eq!(like_pattern("5%_"), "%5\\%\\_%");
    }
}
