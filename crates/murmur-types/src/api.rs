use serde::Deserialize;

// -- Accounts --

/// Body of `POST /register` and `POST /login`.
///
/// Clients often send a whole account object back; `accountId` is accepted
/// and ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[serde(default)]
    pub account_id: Option<i64>,
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub message_id: Option<i64>,
    pub posted_by: i64,
    pub message_text: String,
    /// Defaults to the current time when omitted.
    #[serde(default)]
    pub posted_at: Option<i64>,
}

/// Body of `PATCH /messages/{id}`. Only the text is read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    pub message_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_message_accepts_full_message_object() {
        let req: CreateMessageRequest = serde_json::from_str(
            r#"{"messageId": 99, "postedBy": 3, "messageText": "hi", "postedAt": 1669947792}"#,
        )
        .unwrap();
        assert_eq!(req.message_id, Some(99));
        assert_eq!(req.posted_by, 3);
        assert_eq!(req.posted_at, Some(1_669_947_792));
    }

    #[test]
    fn posted_at_is_optional() {
        let req: CreateMessageRequest =
            serde_json::from_str(r#"{"postedBy": 3, "messageText": "hi"}"#).unwrap();
        assert_eq!(req.posted_at, None);
    }

    #[test]
    fn credentials_require_both_fields() {
        let res = serde_json::from_str::<CredentialsRequest>(r#"{"username": "ana"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn update_ignores_extra_fields() {
        let req: UpdateMessageRequest =
            serde_json::from_str(r#"{"messageText": "edited", "postedBy": 1}"#).unwrap();
        assert_eq!(req.message_text, "edited");
    }
}
