//! The private-message entity (`t4`).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{self, timestamps};
use crate::error::Result;
use crate::things::{meta_from_envelope, ThingKind, ThingMeta};

/// A private message between accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Identity and fetch-time metadata
    #[serde(skip)]
    pub meta: ThingMeta,
    /// Sender's username
    #[serde(default)]
    pub author: String,
    /// Recipient's username
    #[serde(default)]
    pub dest: String,
    /// Subject line
    #[serde(default)]
    pub subject: String,
    /// Message body as markdown
    #[serde(default)]
    pub body: String,
    /// Whether this message is actually a comment reply
    #[serde(default)]
    pub was_comment: bool,
    /// Whether the message is unread
    #[serde(default)]
    pub new: bool,
    /// When the message was sent
    #[serde(default, deserialize_with = "timestamps::opt_epoch_seconds")]
    pub created_utc: Option<DateTime<Utc>>,
}

impl Message {
    pub(crate) fn from_envelope(json: &Value) -> Result<Self> {
        let data = envelope::data_of(json)?;
        let mut message: Message = serde_json::from_value(data.clone())?;
        message.meta = meta_from_envelope(json, ThingKind::Message)?;
        Ok(message)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.meta.full_name == other.meta.full_name
    }
}

impl Eq for Message {}
