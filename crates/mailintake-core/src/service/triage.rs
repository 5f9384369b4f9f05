//! Triage runs: search, check, archive, reply.

use mailintake_lexicon::KeywordExpander;

use super::mailbox::{InboundMessage, Mailbox};
use crate::Result;
use crate::archive::{ArchivePlan, Sender, Storage};
use crate::checklist::{DocumentSpec, find_missing, format_missing};
use crate::config::{IntakeConfig, SubmissionType};
use crate::ledger::{ProcessedSubmission, TriageLedger};
use crate::reply::{ReplyTemplate, ReplyVars, vars};

/// Counters collected during a triage run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Submission types whose search was issued.
    pub types_searched: u32,
    /// Messages returned by searches.
    pub messages_seen: u32,
    /// Messages with every required document.
    pub accepted: u32,
    /// Messages with missing documents.
    pub incomplete: u32,
    /// Messages skipped (no attachments or already processed).
    pub skipped: u32,
    /// Attachments written to storage.
    pub files_archived: u32,
    /// Attachments already present in storage.
    pub files_existing: u32,
    /// Mailbox or storage operations that failed.
    pub failures: u32,
}

/// Runs triage for every configured submission type.
///
/// Per-message backend failures are logged and counted; the message is
/// left unrecorded so the next run retries it. Only ledger failures abort
/// a run.
pub struct TriageService<M, S> {
    config: IntakeConfig,
    expander: KeywordExpander,
    mailbox: M,
    storage: S,
    ledger: Option<TriageLedger>,
}

impl<M: Mailbox, S: Storage> TriageService<M, S> {
    /// Creates a service without a ledger.
    #[must_use]
    pub fn new(config: IntakeConfig, mailbox: M, storage: S) -> Self {
        let expander = config.expander();
        Self {
            config,
            expander,
            mailbox,
            storage,
            ledger: None,
        }
    }

    /// Remember processed messages in `ledger`.
    #[must_use]
    pub fn with_ledger(mut self, ledger: TriageLedger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Mailbox backend.
    #[must_use]
    pub const fn mailbox(&self) -> &M {
        &self.mailbox
    }

    /// Storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Search query for a submission type, or `None` when it has no keywords.
    #[must_use]
    pub fn search_query(&self, submission: &SubmissionType) -> Option<String> {
        self.expander
            .expand(&submission.keywords)
            .to_search_query(&self.config.search_filters)
    }

    /// Process every configured submission type.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read or written.
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();
        for submission in &self.config.submission_types {
            self.process_submission_type(submission, &mut report).await?;
        }

        tracing::info!(
            "Triage finished: {} accepted, {} incomplete, {} files archived, {} failures",
            report.accepted,
            report.incomplete,
            report.files_archived,
            report.failures
        );
        Ok(report)
    }

    /// Process the messages matching one submission type.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read or written.
    pub async fn process_submission_type(
        &self,
        submission: &SubmissionType,
        report: &mut RunReport,
    ) -> Result<()> {
        let Some(query) = self.search_query(submission) else {
            tracing::warn!("Submission type '{}' has no keywords, skipping", submission.name);
            return Ok(());
        };

        tracing::debug!("Searching '{}' with query: '{}'", submission.name, query);
        report.types_searched += 1;

        let messages = match self.mailbox.search(&query).await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::error!("Search failed for '{}': {}", submission.name, e);
                report.failures += 1;
                return Ok(());
            }
        };

        tracing::info!(
            "Found {} messages for '{}'",
            messages.len(),
            submission.name
        );

        for message in &messages {
            self.process_message(submission, message, report).await?;
        }
        Ok(())
    }

    async fn process_message(
        &self,
        submission: &SubmissionType,
        message: &InboundMessage,
        report: &mut RunReport,
    ) -> Result<()> {
        report.messages_seen += 1;

        if message.attachments.is_empty() {
            report.skipped += 1;
            return Ok(());
        }

        if let Some(ledger) = &self.ledger {
            if ledger.is_processed(&message.id, &submission.name).await? {
                tracing::debug!("Message {} already processed", message.id);
                report.skipped += 1;
                return Ok(());
            }
        }

        let sender = Sender::parse(&message.from);
        let names = message.attachment_names();
        let missing = find_missing(&submission.documents, names.as_slice());

        let template = if missing.is_empty() {
            if !self.archive_attachments(submission, message, &sender, report).await {
                return Ok(());
            }
            report.accepted += 1;
            submission.replies.accepted.as_ref()
        } else {
            tracing::info!(
                "Message {} from {} is missing {} documents",
                message.id,
                sender.email,
                missing.len()
            );
            report.incomplete += 1;
            submission.replies.incomplete.as_ref()
        };

        if let Some(template) = template {
            let vars = reply_vars(submission, message, &sender, &missing);
            if !self.send_reply(message, template, &vars).await {
                report.failures += 1;
                return Ok(());
            }
        }

        if let Some(ledger) = &self.ledger {
            let missing_count = u32::try_from(missing.len()).unwrap_or(u32::MAX);
            ledger
                .record(&ProcessedSubmission::new(
                    &message.id,
                    &submission.name,
                    &sender.email,
                    missing_count,
                ))
                .await?;
        }
        Ok(())
    }

    /// Archive every attachment. Returns false if any storage call failed.
    async fn archive_attachments(
        &self,
        submission: &SubmissionType,
        message: &InboundMessage,
        sender: &Sender,
        report: &mut RunReport,
    ) -> bool {
        let plan = ArchivePlan::new(
            &self.config.archive_root,
            &submission.name,
            sender.clone(),
            &message.subject,
            message.date,
        );
        let folder = plan.folder();

        if let Err(e) = self.storage.ensure_folder(folder).await {
            tracing::error!("Cannot create folder '{}': {}", folder, e);
            report.failures += 1;
            return false;
        }

        let mut all_stored = true;
        for attachment in &message.attachments {
            let file = plan.archived_file(attachment);

            match self.storage.file_exists(folder, &file.name).await {
                Ok(true) => {
                    tracing::info!("Skipping upload for '{}' as it already exists", file.name);
                    report.files_existing += 1;
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Error checking '{}' in '{}': {}", file.name, folder, e);
                    report.failures += 1;
                    all_stored = false;
                    continue;
                }
            }

            match self.storage.write_file(folder, &file).await {
                Ok(()) => {
                    tracing::info!("File '{}' archived to '{}'", file.name, folder);
                    report.files_archived += 1;
                }
                Err(e) => {
                    tracing::warn!("Error saving '{}' to '{}': {}", file.name, folder, e);
                    report.failures += 1;
                    all_stored = false;
                }
            }
        }
        all_stored
    }

    async fn send_reply(
        &self,
        message: &InboundMessage,
        template: &ReplyTemplate,
        vars: &ReplyVars,
    ) -> bool {
        let reply = match template.render(vars) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Cannot render reply for message {}: {}", message.id, e);
                return false;
            }
        };

        match self.mailbox.reply(message, &reply).await {
            Ok(()) => {
                tracing::debug!("Replied to message {}", message.id);
                true
            }
            Err(e) => {
                tracing::warn!("Reply to message {} failed: {}", message.id, e);
                false
            }
        }
    }
}

fn reply_vars(
    submission: &SubmissionType,
    message: &InboundMessage,
    sender: &Sender,
    missing: &[&DocumentSpec],
) -> ReplyVars {
    ReplyVars::new()
        .with_text(vars::SENDER_NAME, sender.name.as_str())
        .with_text(vars::SENDER_EMAIL, sender.email.as_str())
        .with_text(vars::SUBJECT, message.subject.as_str())
        .with_text(vars::SUBMISSION_TYPE, submission.name.as_str())
        .with_text(vars::DOCUMENT_COUNT, message.attachments.len().to_string())
        .with_html(vars::MISSING_DOCUMENTS, format_missing(missing.iter().copied()))
}
