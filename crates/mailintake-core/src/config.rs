//! Configuration: submission types, keyword seeds and reply templates.
//!
//! Configuration is a JSON file. When no file exists the built-in
//! defaults are used, so a fresh install can run without setup.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use mailintake_lexicon::{KeywordExpander, Pluralizer};
use serde::{Deserialize, Serialize};

use crate::checklist::DocumentSpec;
use crate::reply::ReplyTemplate;
use crate::{Error, Result};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "MAILINTAKE_CONFIG";

/// Search filters appended to every keyword query.
pub const DEFAULT_SEARCH_FILTERS: &str = "in:inbox has:attachment";

/// Top-level archive folder.
pub const DEFAULT_ARCHIVE_ROOT: &str = "Files";

fn default_search_filters() -> String {
    DEFAULT_SEARCH_FILTERS.to_string()
}

fn default_archive_root() -> String {
    DEFAULT_ARCHIVE_ROOT.to_string()
}

/// Reply templates for the two triage outcomes.
///
/// A missing template means no reply is sent for that outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTemplates {
    /// Sent when every required document was received.
    #[serde(default)]
    pub accepted: Option<ReplyTemplate>,
    /// Sent when documents are missing.
    #[serde(default)]
    pub incomplete: Option<ReplyTemplate>,
}

/// A named category of inbound submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionType {
    /// Unique name, also used as the archive folder.
    pub name: String,
    /// Seed search terms. Each entry may hold several whitespace-separated words.
    pub keywords: Vec<String>,
    /// Required documents, in reporting order.
    #[serde(default)]
    pub documents: Vec<DocumentSpec>,
    /// Reply templates.
    #[serde(default)]
    pub replies: ReplyTemplates,
}

/// Complete `mailintake` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Mail search filters appended after the keyword terms.
    #[serde(default = "default_search_filters")]
    pub search_filters: String,
    /// Root folder of the archive hierarchy.
    #[serde(default = "default_archive_root")]
    pub archive_root: String,
    /// Singular → plural overrides applied before the built-in rules.
    #[serde(default)]
    pub plural_overrides: BTreeMap<String, String>,
    /// Configured submission types.
    #[serde(default)]
    pub submission_types: Vec<SubmissionType>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            search_filters: default_search_filters(),
            archive_root: default_archive_root(),
            plural_overrides: BTreeMap::new(),
            submission_types: vec![SubmissionType {
                name: "pasantias".to_string(),
                keywords: vec!["pasantía".to_string()],
                documents: vec![
                    DocumentSpec::new(["cv", "curriculum", "currículum"], ["pdf"]),
                    DocumentSpec::new(["carta de postulación", "carta"], ["pdf", "docx"]),
                ],
                replies: ReplyTemplates {
                    accepted: Some(ReplyTemplate::new(
                        "Re: $SUBJECT",
                        "<p>Hola $SENDER_NAME,</p>\
                         <p>Recibimos tus $DOCUMENT_COUNT documentos para $SUBMISSION_TYPE. \
                         Tu postulación está completa.</p>",
                    )),
                    incomplete: Some(ReplyTemplate::new(
                        "Re: $SUBJECT",
                        "<p>Hola $SENDER_NAME,</p>\
                         <p>Para completar tu postulación a $SUBMISSION_TYPE falta enviar:</p>\
                         <p>$MISSING_DOCUMENTS</p>",
                    )),
                },
            }],
        }
    }
}

impl IntakeConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            tracing::info!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config = Self::from_json(&contents)?;
        tracing::debug!(
            "Loaded {} submission types from {:?}",
            config.submission_types.len(),
            path
        );
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Find a submission type by name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSubmissionType`] if no type has this name.
    pub fn submission_type(&self, name: &str) -> Result<&SubmissionType> {
        let wanted = name.to_lowercase();
        self.submission_types
            .iter()
            .find(|t| t.name.to_lowercase() == wanted)
            .ok_or_else(|| Error::UnknownSubmissionType(name.to_string()))
    }

    /// Keyword expander honoring the configured plural overrides.
    #[must_use]
    pub fn expander(&self) -> KeywordExpander {
        KeywordExpander::new(Pluralizer::with_overrides(
            self.plural_overrides
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }
}

/// Configuration file location.
///
/// `$MAILINTAKE_CONFIG` when set, otherwise `<config dir>/mailintake/config.json`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailintake")
        .join("config.json")
}

/// A problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// A submission type has a blank name.
    EmptyTypeName {
        /// Position in `submission_types`.
        index: usize,
    },
    /// Two submission types share a name (case-insensitive).
    DuplicateTypeName(String),
    /// A submission type has no search keywords.
    NoKeywords(String),
    /// A document spec lists no names.
    DocumentWithoutNames {
        /// Submission type name.
        submission_type: String,
        /// Position in `documents`.
        index: usize,
    },
    /// A document spec lists no extensions.
    DocumentWithoutExtensions {
        /// Submission type name.
        submission_type: String,
        /// Position in `documents`.
        index: usize,
    },
}

impl ConfigIssue {
    /// Get the configuration field this issue relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTypeName { .. } | Self::DuplicateTypeName(_) => "name",
            Self::NoKeywords(_) => "keywords",
            Self::DocumentWithoutNames { .. } => "documents.names",
            Self::DocumentWithoutExtensions { .. } => "documents.extensions",
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTypeName { index } => {
                write!(f, "Submission type #{} has no name", index + 1)
            }
            Self::DuplicateTypeName(name) => {
                write!(f, "Submission type '{name}' is defined more than once")
            }
            Self::NoKeywords(name) => {
                write!(f, "Submission type '{name}' has no search keywords")
            }
            Self::DocumentWithoutNames {
                submission_type,
                index,
            } => write!(
                f,
                "Document #{} of '{submission_type}' has no names",
                index + 1
            ),
            Self::DocumentWithoutExtensions {
                submission_type,
                index,
            } => write!(
                f,
                "Document #{} of '{submission_type}' has no extensions",
                index + 1
            ),
        }
    }
}

impl std::error::Error for ConfigIssue {}

/// Validate a configuration.
///
/// Returns `Ok(())` if valid, or every issue found.
///
/// # Errors
///
/// Returns a vector of `ConfigIssue` if any submission type is malformed.
pub fn validate_config(config: &IntakeConfig) -> std::result::Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, submission) in config.submission_types.iter().enumerate() {
        let name = submission.name.trim();
        if name.is_empty() {
            issues.push(ConfigIssue::EmptyTypeName { index });
        } else if !seen.insert(name.to_lowercase()) {
            issues.push(ConfigIssue::DuplicateTypeName(name.to_string()));
        }

        if submission.keywords.iter().all(|k| k.trim().is_empty()) {
            issues.push(ConfigIssue::NoKeywords(name.to_string()));
        }

        for (index, spec) in submission.documents.iter().enumerate() {
            if spec.names.iter().all(|n| n.trim().is_empty()) {
                issues.push(ConfigIssue::DocumentWithoutNames {
                    submission_type: name.to_string(),
                    index,
                });
            }
            if spec.extensions.iter().all(|e| e.trim().is_empty()) {
                issues.push(ConfigIssue::DocumentWithoutExtensions {
                    submission_type: name.to_string(),
                    index,
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
