use serde::{Deserialize, Serialize};

/// A registered account as returned by the API.
///
/// The password is echoed back in plain text: Murmur has no hashing or
/// session layer and clients identify themselves by the full credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    /// Unix timestamp in seconds, as supplied by the client.
    pub posted_at: i64,
}
