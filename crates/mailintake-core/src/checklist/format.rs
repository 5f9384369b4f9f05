//! Human-readable rendering of missing documents.

use super::model::DocumentSpec;

/// Line-break marker used in HTML reply bodies.
pub const LINE_BREAK: &str = "<br>";

/// Joins alternatives the way a Spanish sentence would.
///
/// One item renders as itself; more render as `a, b o c`. The final
/// connector becomes `u` before a word starting with an `o` sound.
///
/// ```
/// use mailintake_core::checklist::join_alternatives;
///
/// assert_eq!(join_alternatives(&["pdf"]), "pdf");
/// assert_eq!(join_alternatives(&["pdf", "docx", "odt"]), "pdf, docx u odt");
/// ```
#[must_use]
pub fn join_alternatives<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let last = last.as_ref();
            let init: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} {} {last}", init.join(", "), disjunction_before(last))
        }
    }
}

fn disjunction_before(word: &str) -> &'static str {
    let lower = word.to_lowercase();
    let sound = lower.strip_prefix('h').unwrap_or(&lower);
    if sound.starts_with(['o', 'ó']) {
        "u"
    } else {
        "o"
    }
}

fn format_line(spec: &DocumentSpec) -> String {
    let names = join_alternatives(spec.names.as_slice());
    let extensions: Vec<&str> = spec.normalized_extensions().collect();
    if extensions.is_empty() {
        format!("{names}.")
    } else {
        format!("{names} (en formato {}).", join_alternatives(extensions.as_slice()))
    }
}

/// Renders missing documents as `LINE_BREAK`-terminated lines.
///
/// The result is the `$MISSING_DOCUMENTS` substitution of a reply.
#[must_use]
pub fn format_missing<'a, I>(missing: I) -> String
where
    I: IntoIterator<Item = &'a DocumentSpec>,
{
    format_missing_with(missing, LINE_BREAK)
}

/// Like [`format_missing`], terminating each line with `line_break`.
#[must_use]
pub fn format_missing_with<'a, I>(missing: I, line_break: &str) -> String
where
    I: IntoIterator<Item = &'a DocumentSpec>,
{
    missing.into_iter().fold(String::new(), |mut out, spec| {
        out.push_str(&format_line(spec));
        out.push_str(line_break);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_single() {
        assert_eq!(join_alternatives(&["CV"]), "CV");
    }

    #[test]
    fn test_join_two() {
        assert_eq!(join_alternatives(&["CV", "currículum"]), "CV o currículum");
    }

    #[test]
    fn test_join_many() {
        assert_eq!(join_alternatives(&["a", "b", "c", "d"]), "a, b, c o d");
    }

    #[test]
    fn test_join_empty() {
        let none: [&str; 0] = [];
        assert_eq!(join_alternatives(&none), "");
    }

    #[test]
    fn test_join_u_before_o_sound() {
        assert_eq!(join_alternatives(&["carta", "oficio"]), "carta u oficio");
        assert_eq!(join_alternatives(&["nota", "hoja"]), "nota u hoja");
        assert_eq!(join_alternatives(&["nota", "Hoja"]), "nota u Hoja");
        assert_eq!(join_alternatives(&["nota", "huevo"]), "nota o huevo");
    }

    #[test]
    fn test_format_two_names_one_extension() {
        let missing = [DocumentSpec::new(["A", "B"], ["C"])];
        assert_eq!(format_missing(&missing), "A o B (en formato C).<br>");
    }

    #[test]
    fn test_format_multiple_lines_in_order() {
        let missing = [
            DocumentSpec::new(["CV"], ["pdf"]),
            DocumentSpec::new(["carta", "constancia", "aval"], [".pdf", "docx"]),
        ];
        assert_eq!(
            format_missing_with(&missing, "\n"),
            "CV (en formato pdf).\ncarta, constancia o aval (en formato pdf o docx).\n"
        );
    }

    #[test]
    fn test_format_without_extensions() {
        let missing = [DocumentSpec::new(["foto"], Vec::<String>::new())];
        assert_eq!(format_missing(&missing), "foto.<br>");
    }

    #[test]
    fn test_format_nothing_missing() {
        let none: [DocumentSpec; 0] = [];
        assert_eq!(format_missing(&none), "");
    }
}
