use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            id          TEXT PRIMARY KEY,
            name        TEXT,
            phone       TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS ai_agents (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS inbox_conversations (
            id                      TEXT PRIMARY KEY,
            phone                   TEXT NOT NULL,
            contact_id              TEXT REFERENCES contacts(id),
            ai_agent_id             TEXT REFERENCES ai_agents(id),
            status                  TEXT NOT NULL DEFAULT 'open',
            mode                    TEXT NOT NULL DEFAULT 'bot',
            priority                TEXT NOT NULL DEFAULT 'normal',
            handoff_summary         TEXT,
            last_message_preview    TEXT,
            last_message_at         TEXT,
            unread_count            INTEGER NOT NULL DEFAULT 0,
            created_at              TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_conversations_status_recent
            ON inbox_conversations(status, last_message_at);

        CREATE INDEX IF NOT EXISTS idx_conversations_phone
            ON inbox_conversations(phone);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
