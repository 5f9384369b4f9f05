//! Mailbox backend interface.

use std::future::Future;

use chrono::{DateTime, FixedOffset};

use crate::Result;
use crate::reply::OutgoingReply;

/// An attachment of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename including extension.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Raw contents.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// A message returned by a mailbox search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Backend-specific identifier, stable across searches.
    pub id: String,
    /// Raw `From` header value.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Date sent, if known.
    pub date: Option<DateTime<FixedOffset>>,
    /// Attachments in message order.
    pub attachments: Vec<Attachment>,
}

impl InboundMessage {
    /// Attachment filenames in message order.
    #[must_use]
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect()
    }
}

/// A mail account that can be searched and replied from.
pub trait Mailbox {
    /// Search messages with a backend query string.
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<InboundMessage>>> + Send;

    /// Reply to `message`.
    fn reply(
        &self,
        message: &InboundMessage,
        reply: &OutgoingReply,
    ) -> impl Future<Output = Result<()>> + Send;
}
