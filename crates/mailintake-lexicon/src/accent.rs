//! Naive accent correction candidates.

use std::collections::BTreeSet;

/// Returns the acute-accented form of an unaccented vowel.
#[must_use]
pub const fn accented(c: char) -> Option<char> {
    match c {
        'a' => Some('á'),
        'e' => Some('é'),
        'i' => Some('í'),
        'o' => Some('ó'),
        'u' => Some('ú'),
        _ => None,
    }
}

/// Returns `word` plus every variant with exactly one vowel accented.
///
/// Purely positional: one candidate per unaccented vowel, no dictionary
/// lookup, so most candidates are not real words. The set always holds
/// `1 + (number of unaccented vowels)` entries.
///
/// ```
/// use mailintake_lexicon::accent_candidates;
///
/// let candidates = accent_candidates("pasante");
/// assert_eq!(candidates.len(), 4);
/// assert!(candidates.contains("pasánte"));
/// ```
#[must_use]
pub fn accent_candidates(word: &str) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    candidates.insert(word.to_string());

    for (idx, c) in word.char_indices() {
        if let Some(accent) = accented(c) {
            let mut candidate = String::with_capacity(word.len() + 1);
            candidate.push_str(&word[..idx]);
            candidate.push(accent);
            candidate.push_str(&word[idx + c.len_utf8()..]);
            candidates.insert(candidate);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pasante_candidates() {
        let candidates = accent_candidates("pasante");
        let expected: BTreeSet<String> = ["pasante", "pásante", "pasánte", "pasanté"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn test_already_accented_vowels_are_kept() {
        // Only the three plain "a"s produce candidates.
        let candidates = accent_candidates("pasantía");
        assert_eq!(candidates.len(), 4);
        assert!(candidates.contains("pasantía"));
        assert!(candidates.contains("pásantía"));
        assert!(candidates.contains("pasantíá"));
    }

    #[test]
    fn test_no_vowels() {
        let candidates = accent_candidates("pdf");
        assert_eq!(candidates.len(), 1);
        assert!(candidates.contains("pdf"));
    }

    #[test]
    fn test_empty_word() {
        let candidates = accent_candidates("");
        assert_eq!(candidates.len(), 1);
        assert!(candidates.contains(""));
    }

    #[test]
    fn test_accented_map() {
        assert_eq!(accented('a'), Some('á'));
        assert_eq!(accented('u'), Some('ú'));
        assert_eq!(accented('á'), None);
        assert_eq!(accented('x'), None);
    }

    proptest! {
        #[test]
        fn prop_size_is_one_plus_vowels(word in "[a-zñáéíóú]{0,12}") {
            let vowels = word.chars().filter(|c| accented(*c).is_some()).count();
            let candidates = accent_candidates(&word);
            prop_assert_eq!(candidates.len(), 1 + vowels);
            prop_assert!(candidates.contains(&word));
        }

        #[test]
        fn prop_candidates_keep_char_count(word in "[a-z]{1,12}") {
            let len = word.chars().count();
            for candidate in accent_candidates(&word) {
                prop_assert_eq!(candidate.chars().count(), len);
            }
        }
    }
}
