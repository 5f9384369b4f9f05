//! Folder and file naming for archived attachments.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset};

use crate::service::Attachment;

/// Folder used for messages without a date.
pub const UNDATED_FOLDER: &str = "undated";

/// Sender of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Display name, or the local part of the address when none was given.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl Sender {
    /// Parse a `From` header value.
    ///
    /// Accepts `"Name" <addr>`, `Name <addr>`, `<addr>` and a bare `addr`.
    /// When the name is missing or equal to the address, the local part of
    /// the address is used instead.
    #[must_use]
    pub fn parse(from: &str) -> Self {
        let from = from.trim();

        let (name, email) = match (from.rfind('<'), from.strip_suffix('>')) {
            (Some(open), Some(without_close)) => {
                let name = from[..open].trim().trim_matches('"').trim();
                (name, without_close[open + 1..].trim())
            }
            _ => ("", from),
        };

        let name = if name.is_empty() || name == email {
            email.split('@').next().unwrap_or(email)
        } else {
            name
        };

        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

/// A folder path as a list of segments, rendered with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchivePath(Vec<String>);

impl ArchivePath {
    /// Creates a path from segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// A file to persist in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFile {
    /// Name inside the folder.
    pub name: String,
    /// Human-readable provenance.
    pub description: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// Archive layout for one accepted message.
#[derive(Debug, Clone)]
pub struct ArchivePlan {
    folder: ArchivePath,
    sender: Sender,
    subject: String,
    timestamp: String,
}

impl ArchivePlan {
    /// Plans the archive location for a message.
    ///
    /// Month folders use English month names (`2024/March`). Undated messages
    /// go to an [`UNDATED_FOLDER`] below the submission type.
    #[must_use]
    pub fn new(
        root: &str,
        submission_type: &str,
        sender: Sender,
        subject: &str,
        date: Option<DateTime<FixedOffset>>,
    ) -> Self {
        let mut segments = vec![root.to_string(), submission_type.to_string()];
        let timestamp = if let Some(date) = date {
            segments.push(date.year().to_string());
            segments.push(date.format("%B").to_string());
            date.format("%H:%M:%S").to_string()
        } else {
            segments.push(UNDATED_FOLDER.to_string());
            "--:--:--".to_string()
        };

        Self {
            folder: ArchivePath(segments),
            sender,
            subject: subject.to_string(),
            timestamp,
        }
    }

    /// Destination folder.
    #[must_use]
    pub const fn folder(&self) -> &ArchivePath {
        &self.folder
    }

    /// Name an attachment is archived under.
    #[must_use]
    pub fn file_name(&self, attachment_name: &str) -> String {
        format!(
            "({}) ({}) ({attachment_name})",
            self.sender.name, self.timestamp
        )
    }

    /// Provenance note stored with each file.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Email from {}_{} with subject '{}'",
            self.sender.name, self.sender.email, self.subject
        )
    }

    /// Builds the file to archive for `attachment`.
    #[must_use]
    pub fn archived_file(&self, attachment: &Attachment) -> ArchivedFile {
        ArchivedFile {
            name: self.file_name(&attachment.filename),
            description: self.description(),
            content_type: attachment.content_type.clone(),
            data: attachment.data.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(s: &str) -> Option<DateTime<FixedOffset>> {
        Some(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[test]
    fn test_parse_quoted_name() {
        let sender = Sender::parse("\"Ana Pérez\" <ana@example.com>");
        assert_eq!(sender.name, "Ana Pérez");
        assert_eq!(sender.email, "ana@example.com");
    }

    #[test]
    fn test_parse_unquoted_name() {
        let sender = Sender::parse("Ana Pérez <ana@example.com>");
        assert_eq!(sender.name, "Ana Pérez");
        assert_eq!(sender.email, "ana@example.com");
    }

    #[test]
    fn test_parse_bracketed_address_only() {
        let sender = Sender::parse("<ana@example.com>");
        assert_eq!(sender.name, "ana");
        assert_eq!(sender.email, "ana@example.com");
    }

    #[test]
    fn test_parse_bare_address() {
        let sender = Sender::parse("  ana@example.com ");
        assert_eq!(sender.name, "ana");
        assert_eq!(sender.email, "ana@example.com");
    }

    #[test]
    fn test_parse_name_equal_to_address() {
        let sender = Sender::parse("ana@example.com <ana@example.com>");
        assert_eq!(sender.name, "ana");
    }

    #[test]
    fn test_dated_folder() {
        let plan = ArchivePlan::new(
            "Files",
            "pasantias",
            Sender::parse("Ana <ana@example.com>"),
            "Postulación",
            date("2024-03-05T14:07:09-04:00"),
        );
        assert_eq!(plan.folder().to_string(), "Files/pasantias/2024/March");
        assert_eq!(plan.file_name("cv.pdf"), "(Ana) (14:07:09) (cv.pdf)");
        assert_eq!(
            plan.description(),
            "Email from Ana_ana@example.com with subject 'Postulación'"
        );
    }

    #[test]
    fn test_undated_folder() {
        let plan = ArchivePlan::new("Files", "becas", Sender::parse("a@b.c"), "", None);
        assert_eq!(
            plan.folder().segments(),
            &["Files", "becas", UNDATED_FOLDER]
        );
        assert_eq!(plan.file_name("x.pdf"), "(a) (--:--:--) (x.pdf)");
    }

    #[test]
    fn test_archived_file() {
        let plan = ArchivePlan::new("Files", "becas", Sender::parse("a@b.c"), "s", None);
        let attachment = Attachment::new("cv.pdf", "application/pdf", b"%PDF".to_vec());
        let file = plan.archived_file(&attachment);
        assert_eq!(file.name, "(a) (--:--:--) (cv.pdf)");
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.data, b"%PDF");
    }
}
