//! # mailintake-lexicon
//!
//! Keyword expansion for Spanish-language mail searches.
//!
//! ## Features
//!
//! - **Pluralization**: Rule-table Spanish pluralizer with irregular forms
//! - **Accent candidates**: Single-vowel accent variants for misspelled terms
//! - **Keyword expansion**: Seed terms to a deduplicated OR-search term set
//!
//! ## Quick Start
//!
//! ```
//! use mailintake_lexicon::{expand_keywords, pluralize};
//!
//! assert_eq!(pluralize("luz"), "luces");
//!
//! let keywords = expand_keywords(["Pasantía"]);
//! assert!(keywords.contains("pasantías"));
//!
//! let query = keywords.to_search_query("has:attachment");
//! assert!(query.is_some_and(|q| q.ends_with(" has:attachment")));
//! ```
//!
//! Everything in this crate is pure: no I/O, no shared state, and no
//! function can fail. Unknown words fall through to the default rule.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod accent;
mod expand;
mod pluralize;

pub use accent::{accent_candidates, accented};
pub use expand::{KeywordExpander, KeywordSet, expand_keywords};
pub use pluralize::{Pluralizer, pluralize};
