//! # mailintake-core
//!
//! Core business logic for `mailintake`, the inbound submission triage tool.
//!
//! This crate provides:
//! - **Checklists** - Required-document specs and missing-document detection
//! - **Configuration** - Submission types, keyword seeds and reply templates
//! - **Replies** - `$NAME` placeholder rendering with a plain-text alternative
//! - **Archive** - Dated, typed folder planning and filesystem storage
//! - **Ledger** - `SQLite` record of processed messages
//! - **Triage Service** - Search, check, archive and reply over pluggable
//!   mailbox and storage backends

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod archive;
pub mod checklist;
pub mod config;
mod error;
pub mod ledger;
pub mod reply;
pub mod service;

pub use archive::{ArchivePath, ArchivePlan, ArchivedFile, FsStorage, Sender, Storage};
pub use checklist::{DocumentSpec, find_missing, format_missing, format_missing_with};
pub use config::{
    ConfigIssue, IntakeConfig, ReplyTemplates, SubmissionType, default_config_path,
    validate_config,
};
pub use error::{Error, Result};
pub use ledger::{LedgerStats, ProcessedSubmission, SubmissionOutcome, TriageLedger};
pub use reply::{OutgoingReply, ReplyTemplate, ReplyVars};
pub use service::{Attachment, InboundMessage, Mailbox, RunReport, TriageService};
