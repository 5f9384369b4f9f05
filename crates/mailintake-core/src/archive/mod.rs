//! Archiving accepted attachments.
//!
//! Accepted submissions are stored under a dated, typed hierarchy:
//!
//! ```text
//! <archive root>/<submission type>/<year>/<month>/(<sender>) (<HH:MM:SS>) (<filename>)
//! ```
//!
//! [`ArchivePlan`] derives the folder and file names from a message;
//! a [`Storage`] backend persists them.

mod plan;
mod storage;

pub use plan::{ArchivePath, ArchivePlan, ArchivedFile, Sender, UNDATED_FOLDER};
pub use storage::{FsStorage, Storage};
