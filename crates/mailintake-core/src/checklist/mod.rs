//! Required-document checklists.
//!
//! Each submission type owns an ordered list of [`DocumentSpec`]s. A spec
//! names one logical document through alternative names and alternative
//! file extensions:
//!
//! ```
//! use mailintake_core::checklist::{DocumentSpec, find_missing, format_missing};
//!
//! let expected = vec![
//!     DocumentSpec::new(["CV", "curriculum"], ["pdf"]),
//!     DocumentSpec::new(["carta"], ["pdf", "docx"]),
//! ];
//!
//! let missing = find_missing(&expected, &["cv.PDF", "notas.xlsx"]);
//! assert_eq!(missing, vec![&expected[1]]);
//! assert_eq!(format_missing(missing), "carta (en formato pdf o docx).<br>");
//! ```

mod format;
mod model;

pub use format::{LINE_BREAK, format_missing, format_missing_with, join_alternatives};
pub use model::{DocumentSpec, find_missing};
