//! Document specs and missing-document detection.

use serde::{Deserialize, Serialize};

/// One required document: any of `names`, in any of `extensions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSpec {
    /// Acceptable base names, matched case-insensitively.
    pub names: Vec<String>,
    /// Acceptable extensions, without the dot.
    pub extensions: Vec<String>,
}

impl DocumentSpec {
    /// Creates a new spec.
    #[must_use]
    pub fn new<N, E>(names: N, extensions: E) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured extensions with any leading dot removed.
    pub fn normalized_extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(|ext| ext.trim_start_matches('.'))
    }

    /// Every acceptable `name.extension` filename, lowercased.
    #[must_use]
    pub fn accepted_filenames(&self) -> Vec<String> {
        self.names
            .iter()
            .flat_map(|name| {
                self.normalized_extensions()
                    .map(move |ext| format!("{name}.{ext}").to_lowercase())
            })
            .collect()
    }

    /// Returns true if any attachment is exactly one of the accepted filenames.
    ///
    /// `lowered_names` must already be lowercased.
    fn is_satisfied_by(&self, lowered_names: &[String]) -> bool {
        self.accepted_filenames()
            .iter()
            .any(|accepted| lowered_names.contains(accepted))
    }

    /// Returns true if any of `attachment_names` satisfies this spec.
    #[must_use]
    pub fn matches_any<S: AsRef<str>>(&self, attachment_names: &[S]) -> bool {
        self.is_satisfied_by(&lowercase_all(attachment_names))
    }
}

fn lowercase_all<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names.iter().map(|n| n.as_ref().to_lowercase()).collect()
}

/// Returns the specs in `expected` that no attachment satisfies.
///
/// Order follows `expected`. Comparison is an exact, case-insensitive
/// filename equality: `CV.pdf` satisfies `(["cv"], ["pdf"])`, while
/// `mi_cv.pdf` and `cv.pdf.zip` do not.
#[must_use]
pub fn find_missing<'a, S: AsRef<str>>(
    expected: &'a [DocumentSpec],
    attachment_names: &[S],
) -> Vec<&'a DocumentSpec> {
    let lowered = lowercase_all(attachment_names);
    expected
        .iter()
        .filter(|spec| !spec.is_satisfied_by(&lowered))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cv() -> DocumentSpec {
        DocumentSpec::new(["CV"], ["pdf"])
    }

    #[test]
    fn test_case_insensitive_match() {
        let expected = vec![cv()];
        assert!(find_missing(&expected, &["cv.pdf"]).is_empty());
        assert!(find_missing(&expected, &["Cv.PDF"]).is_empty());
    }

    #[test]
    fn test_extension_mismatch() {
        let expected = vec![cv()];
        assert_eq!(find_missing(&expected, &["cv.docx"]), vec![&expected[0]]);
    }

    #[test]
    fn test_no_substring_match() {
        let expected = vec![cv()];
        assert_eq!(find_missing(&expected, &["mi_cv.pdf"]).len(), 1);
        assert_eq!(find_missing(&expected, &["cv.pdf.zip"]).len(), 1);
        assert_eq!(find_missing(&expected, &["cv"]).len(), 1);
    }

    #[test]
    fn test_any_synonym_pair_satisfies() {
        let expected = vec![DocumentSpec::new(
            ["cv", "curriculum", "hoja de vida"],
            ["pdf", "docx"],
        )];
        assert!(find_missing(&expected, &["Hoja de Vida.docx"]).is_empty());
        assert!(find_missing(&expected, &["curriculum.pdf"]).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let expected = vec![
            DocumentSpec::new(["a"], ["pdf"]),
            DocumentSpec::new(["b"], ["pdf"]),
            DocumentSpec::new(["c"], ["pdf"]),
        ];
        let missing = find_missing(&expected, &["b.pdf"]);
        assert_eq!(missing, vec![&expected[0], &expected[2]]);
    }

    #[test]
    fn test_empty_inputs() {
        let none: Vec<DocumentSpec> = Vec::new();
        assert!(find_missing(&none, &["cv.pdf"]).is_empty());

        let expected = vec![cv()];
        let no_files: [&str; 0] = [];
        assert_eq!(find_missing(&expected, &no_files).len(), 1);
    }

    #[test]
    fn test_leading_dot_extension() {
        let expected = vec![DocumentSpec::new(["cv"], [".pdf"])];
        assert!(find_missing(&expected, &["cv.pdf"]).is_empty());
    }

    #[test]
    fn test_names_are_literal() {
        // Regex metacharacters in configured names are plain text.
        let expected = vec![DocumentSpec::new(["c.v"], ["pdf"])];
        assert_eq!(find_missing(&expected, &["cxv.pdf"]).len(), 1);
        assert!(find_missing(&expected, &["C.V.pdf"]).is_empty());
    }

    #[test]
    fn test_accepted_filenames_cross_product() {
        let spec = DocumentSpec::new(["CV", "Resume"], ["pdf", "DOCX"]);
        assert_eq!(
            spec.accepted_filenames(),
            vec!["cv.pdf", "cv.docx", "resume.pdf", "resume.docx"]
        );
        assert!(spec.matches_any(&["RESUME.docx"]));
        assert!(!spec.matches_any(&["resume.txt"]));
    }

    #[test]
    fn test_deserialize() {
        let spec: DocumentSpec =
            serde_json::from_str(r#"{"names": ["CV"], "extensions": ["pdf"]}"#).unwrap();
        assert_eq!(spec, cv());
    }
}
