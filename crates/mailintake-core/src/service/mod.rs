//! Triage service.
//!
//! This module bridges the pure keyword and checklist logic with the
//! external mailbox and storage backends.

mod mailbox;
mod triage;

pub use mailbox::{Attachment, InboundMessage, Mailbox};
pub use triage::{RunReport, TriageService};
