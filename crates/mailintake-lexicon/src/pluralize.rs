//! Spanish noun pluralization.
//!
//! Rules are tried in a fixed order and the first applicable one wins.
//! Only a documented subset of Spanish morphology is covered; anything
//! unrecognized ends up with `-es`.

use std::collections::HashMap;

/// Nouns whose stressed final vowel takes `-s` instead of `-es`.
const IRREGULAR: &[(&str, &str)] = &[
    ("mamá", "mamás"),
    ("papá", "papás"),
    ("sofá", "sofás"),
    ("dominó", "dominós"),
];

/// Endings of abstract nouns and fields of study that rarely inflect.
const UNINFLECTED_ENDINGS: &[&str] = &["idad", "esis", "isis", "osis", "dica", "grafía", "logía"];

/// Stressed nasal endings that lose their accent in the plural.
const STRESS_SHIFT_ENDINGS: &[(&str, &str)] = &[
    ("án", "anes"),
    ("én", "enes"),
    ("ín", "ines"),
    ("ón", "ones"),
    ("ún", "unes"),
];

/// Returns true for the five unaccented vowels.
pub(crate) const fn is_unstressed_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Spanish pluralizer with optional caller-supplied overrides.
///
/// The built-in tables are compiled constants. Overrides are read-only
/// once the pluralizer is built and take precedence over every rule.
///
/// # Example
///
/// ```
/// use mailintake_lexicon::Pluralizer;
///
/// let pluralizer = Pluralizer::with_overrides([("curriculum", "curricula")]);
/// assert_eq!(pluralizer.pluralize("Curriculum"), "curricula");
/// assert_eq!(pluralizer.pluralize("carta"), "cartas");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pluralizer {
    overrides: HashMap<String, String>,
}

impl Pluralizer {
    /// Creates a pluralizer using only the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pluralizer with custom singular → plural overrides.
    ///
    /// Keys are matched case-insensitively.
    #[must_use]
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Number of configured overrides.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Returns the plural form of `word`.
    ///
    /// The input is lowercased first, so the output is always lowercase
    /// (overrides are returned as configured).
    #[must_use]
    pub fn pluralize(&self, word: &str) -> String {
        let w = word.to_lowercase();

        // Appending "-es" to nothing would invent a word.
        let Some(last) = w.chars().next_back() else {
            return w;
        };

        if let Some(plural) = self.overrides.get(&w) {
            return plural.clone();
        }

        if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == w) {
            return (*plural).to_string();
        }

        match w.as_str() {
            "el" => return "los".to_string(),
            "la" => return "las".to_string(),
            _ => {}
        }

        if UNINFLECTED_ENDINGS.iter().any(|ending| w.ends_with(ending)) {
            return w;
        }

        // gato => gatos, café => cafés
        if is_unstressed_vowel(last) || last == 'é' {
            return w + "s";
        }

        // hindú => hindúes
        if matches!(last, 'á' | 'í' | 'ó' | 'ú') {
            return w + "es";
        }

        // holandés => holandeses
        if let Some(stem) = w.strip_suffix("és") {
            return format!("{stem}eses");
        }

        // gafas => gafas, but mes => meses
        if last == 's'
            && w.chars().count() > 3
            && w.chars().rev().nth(1).is_some_and(is_unstressed_vowel)
        {
            return w;
        }

        // luz => luces
        if let Some(stem) = w.strip_suffix('z') {
            return format!("{stem}ces");
        }

        // canción => canciones
        for (ending, replacement) in STRESS_SHIFT_ENDINGS {
            if let Some(stem) = w.strip_suffix(ending) {
                return format!("{stem}{replacement}");
            }
        }

        w + "es"
    }
}

/// Returns the plural of `word` using the built-in rules only.
///
/// See [`Pluralizer`] for overrides.
#[must_use]
pub fn pluralize(word: &str) -> String {
    Pluralizer::new().pluralize(word)
}
