//! Ledger of processed submissions.
//!
//! Mail searches return the same messages on every run until they leave
//! the inbox. The ledger remembers which message was handled for which
//! submission type, so senders get exactly one reply.

mod model;
mod repository;

pub use model::{LedgerStats, ProcessedSubmission, SubmissionOutcome};
pub use repository::TriageLedger;
