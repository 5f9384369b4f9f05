//! Reply templates with `$NAME` placeholders.
//!
//! A placeholder is a `$` followed by uppercase letters, digits and
//! underscores (`$SENDER_NAME`). Known placeholders are replaced in a
//! single pass; unknown ones are left verbatim so template typos stay
//! visible in the sent mail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Placeholder names filled in by the triage service.
pub mod vars {
    /// Sender display name.
    pub const SENDER_NAME: &str = "SENDER_NAME";
    /// Sender email address.
    pub const SENDER_EMAIL: &str = "SENDER_EMAIL";
    /// Subject of the inbound message.
    pub const SUBJECT: &str = "SUBJECT";
    /// Submission type name.
    pub const SUBMISSION_TYPE: &str = "SUBMISSION_TYPE";
    /// Formatted missing-document lines.
    pub const MISSING_DOCUMENTS: &str = "MISSING_DOCUMENTS";
    /// Number of attachments received.
    pub const DOCUMENT_COUNT: &str = "DOCUMENT_COUNT";
}

/// A reply subject and HTML body with placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTemplate {
    /// Subject line template (plain text).
    pub subject: String,
    /// Body template (HTML).
    pub body: String,
}

/// A rendered reply ready to hand to the mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReply {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
    /// Plain-text alternative derived from the HTML body.
    pub text_body: String,
}

#[derive(Debug, Clone)]
struct Value {
    text: String,
    is_html: bool,
}

/// Placeholder values for rendering a [`ReplyTemplate`].
#[derive(Debug, Clone, Default)]
pub struct ReplyVars {
    values: BTreeMap<String, Value>,
}

impl ReplyVars {
    /// Creates an empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a plain-text value. It is HTML-escaped when rendered into a body.
    #[must_use]
    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(
            name.to_string(),
            Value {
                text: value.into(),
                is_html: false,
            },
        );
        self
    }

    /// Sets a value that is already HTML and is inserted into bodies as-is.
    #[must_use]
    pub fn with_html(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(
            name.to_string(),
            Value {
                text: value.into(),
                is_html: true,
            },
        );
        self
    }

    /// Returns the raw value of a placeholder.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.text.as_str())
    }

    /// Substitutes placeholders in plain text.
    #[must_use]
    pub fn substitute_text(&self, template: &str) -> String {
        self.substitute(template, |value| value.text.clone())
    }

    /// Substitutes placeholders in HTML, escaping plain-text values.
    #[must_use]
    pub fn substitute_html(&self, template: &str) -> String {
        self.substitute(template, |value| {
            if value.is_html {
                value.text.clone()
            } else {
                escape_html(&value.text)
            }
        })
    }

    fn substitute(&self, template: &str, render: impl Fn(&Value) -> String) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let name_len = after
                .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..name_len];

            match self.values.get(name) {
                Some(value) if !name.is_empty() => out.push_str(&render(value)),
                _ => {
                    out.push('$');
                    out.push_str(name);
                }
            }
            rest = &after[name_len..];
        }

        out.push_str(rest);
        out
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl ReplyTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Renders the template with `vars`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plain-text alternative cannot be produced.
    pub fn render(&self, vars: &ReplyVars) -> Result<OutgoingReply> {
        let html_body = vars.substitute_html(&self.body);
        let text_body = htmd::convert(&html_body)?;
        Ok(OutgoingReply {
            subject: vars.substitute_text(&self.subject),
            html_body,
            text_body,
        })
    }
}
