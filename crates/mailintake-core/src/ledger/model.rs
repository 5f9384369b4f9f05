//! Ledger data models.

/// Result of checking a submission against its checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionOutcome {
    /// Every required document was received; attachments were archived.
    #[default]
    Accepted,
    /// At least one required document is missing.
    Incomplete,
}

impl SubmissionOutcome {
    /// Parse from database string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "incomplete" => Self::Incomplete,
            _ => Self::Accepted,
        }
    }

    /// Convert to database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Incomplete => "incomplete",
        }
    }
}

impl std::str::FromStr for SubmissionOutcome {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A message handled by a triage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedSubmission {
    /// Mailbox message identifier.
    pub message_id: String,
    /// Submission type the message was matched for.
    pub submission_type: String,
    /// Sender email address.
    pub sender: String,
    /// Checklist outcome.
    pub outcome: SubmissionOutcome,
    /// Number of missing documents (zero when accepted).
    pub missing_count: u32,
    /// When the message was processed (set by the database).
    pub processed_at: Option<String>,
}

impl ProcessedSubmission {
    /// Create a new record for the current run.
    #[must_use]
    pub fn new(
        message_id: impl Into<String>,
        submission_type: impl Into<String>,
        sender: impl Into<String>,
        missing_count: u32,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            submission_type: submission_type.into(),
            sender: sender.into(),
            outcome: if missing_count == 0 {
                SubmissionOutcome::Accepted
            } else {
                SubmissionOutcome::Incomplete
            },
            missing_count,
            processed_at: None,
        }
    }
}

/// Counts of processed submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerStats {
    /// Total processed messages.
    pub total: u32,
    /// Accepted submissions.
    pub accepted: u32,
    /// Incomplete submissions.
    pub incomplete: u32,
}
