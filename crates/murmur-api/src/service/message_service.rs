use std::sync::Arc;

use tracing::{debug, info};

use murmur_db::{Database, DbError};
use murmur_types::models::Message;

use crate::error::ApiError;

pub const MAX_MESSAGE_LEN: usize = 255;

/// Message text must be between 1 and [`MAX_MESSAGE_LEN`] characters.
pub fn validate_message_text(text: &str) -> Result<(), ApiError> {
    let len = text.chars().count();
    if len == 0 || len > MAX_MESSAGE_LEN {
        return Err(ApiError::Validation(format!(
            "The message text must be between 1 and {} characters long",
            MAX_MESSAGE_LEN
        )));
    }
    Ok(())
}

/// Message CRUD. Author existence and text length are checked by the
/// handlers before calling in; these methods only talk to the store.
#[derive(Clone)]
pub struct MessageService {
    db: Arc<Database>,
}

impl MessageService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create_message(
        &self,
        posted_by: i64,
        message_text: &str,
        posted_at: i64,
    ) -> Result<Message, ApiError> {
        match self.db.insert_message(posted_by, message_text, posted_at) {
            Ok(row) => {
                info!(message_id = row.id, posted_by, "Message created");
                Ok(row.into())
            }
            // Author vanished between the existence check and the insert.
            Err(DbError::ForeignKeyViolation) => Err(ApiError::Validation(
                "The account posting this message does not exist".into(),
            )),
            Err(DbError::UniqueViolation(msg)) => {
                Err(ApiError::Internal(anyhow::anyhow!("unique violation: {}", msg)))
            }
            Err(DbError::Other(e)) => Err(ApiError::Internal(e)),
        }
    }

    pub fn get_all_messages(&self) -> Result<Vec<Message>, ApiError> {
        let rows = self.db.find_all_messages()?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub fn get_message(&self, id: i64) -> Result<Option<Message>, ApiError> {
        Ok(self.db.find_message_by_id(id)?.map(Into::into))
    }

    /// Returns the number of rows removed, always 1 on success.
    pub fn delete_message(&self, id: i64) -> Result<usize, ApiError> {
        match self.db.delete_message(id)? {
            0 => {
                debug!(message_id = id, "Delete of missing message");
                Err(ApiError::MessageNotFound(id))
            }
            n => {
                info!(message_id = id, "Message deleted");
                Ok(n)
            }
        }
    }

    /// Replaces the text wholesale. Returns the number of rows changed.
    pub fn update_message(&self, id: i64, new_text: &str) -> Result<usize, ApiError> {
        match self.db.update_message_text(id, new_text)? {
            0 => Err(ApiError::MessageNotFound(id)),
            n => {
                info!(message_id = id, "Message updated");
                Ok(n)
            }
        }
    }

    pub fn find_all_by_user(&self, account_id: i64) -> Result<Vec<Message>, ApiError> {
        let rows = self.db.find_messages_by_posted_by(account_id)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
