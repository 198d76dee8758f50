//! Database row types — these map directly to SQLite rows.
//! Distinct from murmur-types API models to keep the DB layer independent.

use murmur_types::models::{Account, Message};

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub posted_at: i64,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            account_id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            message_id: row.id,
            posted_by: row.posted_by,
            message_text: row.message_text,
            posted_at: row.posted_at,
        }
    }
}
