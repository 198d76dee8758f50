use crate::models::{AccountRow, MessageRow};
use crate::{Database, DbError};
use anyhow::Result;
use rusqlite::{Connection, Row};

const ACCOUNT_COLUMNS: &str = "id, username, password, created_at";
const MESSAGE_COLUMNS: &str = "id, posted_by, message_text, posted_at";

impl Database {
    // -- Accounts --

    /// Insert a new account. A taken username comes back as
    /// [`DbError::UniqueViolation`] straight from the UNIQUE constraint.
    pub fn insert_account(&self, username: &str, password: &str) -> Result<AccountRow, DbError> {
        let conn = self.lock()?;
        let row = conn.query_row(
            &format!(
                "INSERT INTO accounts (username, password) VALUES (?1, ?2) RETURNING {ACCOUNT_COLUMNS}"
            ),
            (username, password),
            account_from_row,
        )?;
        Ok(row)
    }

    pub fn find_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_one(
                conn,
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?1"),
                [username],
                account_from_row,
            )
        })
    }

    /// Exact match on both fields; no normalization.
    pub fn find_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_one(
                conn,
                &format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?1 AND password = ?2"
                ),
                [username, password],
                account_from_row,
            )
        })
    }

    pub fn find_account_by_id(&self, id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_one(
                conn,
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1"),
                [id],
                account_from_row,
            )
        })
    }

    // -- Messages --

    /// Insert a message. An unknown author is rejected by the foreign key
    /// and surfaces as [`DbError::ForeignKeyViolation`].
    pub fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        posted_at: i64,
    ) -> Result<MessageRow, DbError> {
        let conn = self.lock()?;
        let row = conn.query_row(
            &format!(
                "INSERT INTO messages (posted_by, message_text, posted_at) VALUES (?1, ?2, ?3) RETURNING {MESSAGE_COLUMNS}"
            ),
            rusqlite::params![posted_by, message_text, posted_at],
            message_from_row,
        )?;
        Ok(row)
    }

    pub fn find_all_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_many(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY id"),
                [],
            )
        })
    }

    pub fn find_message_by_id(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            query_one(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?1"),
                [id],
                message_from_row,
            )
        })
    }

    pub fn find_messages_by_posted_by(&self, posted_by: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_many(
                conn,
                &format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE posted_by = ?1 ORDER BY id"),
                [posted_by],
            )
        })
    }

    /// Replace the text of a message. Returns the number of rows changed (0 or 1).
    pub fn update_message_text(&self, id: i64, message_text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE messages SET message_text = ?1 WHERE id = ?2",
                rusqlite::params![message_text, id],
            )?;
            Ok(changed)
        })
    }

    /// Returns the number of rows removed (0 or 1).
    pub fn delete_message(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            Ok(removed)
        })
    }
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        posted_at: row.get(3)?,
    })
}

fn query_one<P, T, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Option<T>>
where
    P: rusqlite::Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    stmt.query_row(params, map).optional()
}

fn query_many<P>(conn: &Connection, sql: &str, params: P) -> Result<Vec<MessageRow>>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, message_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn insert_account_assigns_id() {
        let db = db();
        let first = db.insert_account("ana", "pass1").unwrap();
        let second = db.insert_account("bo", "pass2").unwrap();

        assert!(first.id > 0);
        assert_ne!(first.id, second.id);
        assert_eq!(first.username, "ana");
        assert!(!first.created_at.is_empty());
    }

    #[test]
    fn duplicate_username_is_unique_violation() {
        let db = db();
        db.insert_account("ana", "pass1").unwrap();

        let err = db.insert_account("ana", "other").unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation(_)), "got {err:?}");
    }

    #[test]
    fn credentials_lookup_is_exact() {
        let db = db();
        let account = db.insert_account("ana", "pass1").unwrap();

        let found = db.find_account_by_credentials("ana", "pass1").unwrap().unwrap();
        assert_eq!(found.id, account.id);
        assert!(db.find_account_by_credentials("ana", "PASS1").unwrap().is_none());
        assert!(db.find_account_by_credentials("Ana", "pass1").unwrap().is_none());
        assert!(db.find_account_by_username("ana").unwrap().is_some());
        assert!(db.find_account_by_id(account.id + 1).unwrap().is_none());
    }

    #[test]
    fn message_for_unknown_author_is_fk_violation() {
        let db = db();
        let err = db.insert_message(42, "orphan", 0).unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation), "got {err:?}");
    }

    #[test]
    fn message_lifecycle() {
        let db = db();
        let ana = db.insert_account("ana", "pass1").unwrap();
        let bo = db.insert_account("bo", "pass2").unwrap();

        let m1 = db.insert_message(ana.id, "first", 100).unwrap();
        let m2 = db.insert_message(bo.id, "second", 200).unwrap();
        db.insert_message(ana.id, "third", 300).unwrap();

        let all = db.find_all_messages().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, m1.id);

        let by_ana: Vec<_> = db
            .find_messages_by_posted_by(ana.id)
            .unwrap()
            .into_iter()
            .map(|m| m.message_text)
            .collect();
        assert_eq!(by_ana, vec!["first", "third"]);

        assert_eq!(db.update_message_text(m2.id, "edited").unwrap(), 1);
        let reloaded = db.find_message_by_id(m2.id).unwrap().unwrap();
        assert_eq!(reloaded.message_text, "edited");
        assert_eq!(reloaded.posted_at, 200);

        assert_eq!(db.delete_message(m2.id).unwrap(), 1);
        assert!(db.find_message_by_id(m2.id).unwrap().is_none());
        assert_eq!(db.delete_message(m2.id).unwrap(), 0);
        assert_eq!(db.update_message_text(m2.id, "gone").unwrap(), 0);
    }
}
