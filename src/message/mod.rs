use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a message carries: plain text, or a reference to an uploaded
/// image/file in object storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
}

/// Serializable snapshot of a message record, as stored in the cache.
///
/// A value type copied into and out of the backing store; the cache never
/// holds a live reference to the durable record. Only raw fields are kept —
/// derived, expiring data (presigned download URLs in particular) stays out
/// so entries remain valid until explicitly invalidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedMessage {
    pub sender_id: String,
    pub receiver_id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub kind: MessageKind,
    /// Object-storage key for image/file messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
    /// Original filename of the upload, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CachedMessage {
    /// A plain text message between two users, timestamped now.
    pub fn text(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            body: body.into(),
            kind: MessageKind::Text,
            object_key: None,
            file_name: None,
            created_at: now,
            updated_at: now,
        }
    }
}
