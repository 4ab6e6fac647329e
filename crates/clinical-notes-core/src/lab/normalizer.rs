//! Test-name normalizer.
//!
//! Handles:
//! - Turkish case folding (İ/I/ı → i) and diacritic folding (ş→s, ğ→g, ü→u, ö→o, ç→c)
//! - Whitespace collapsing and trimming
//! - Near-match suggestions for naming drift between reports

use strsim::{jaro_winkler, normalized_levenshtein};

/// Turkish letters folded to ASCII after lowercasing.
///
/// No output here is also an input, so application order does not matter.
const TURKISH_FOLDS: [(char, char); 6] = [
    ('ı', 'i'),
    ('ş', 's'),
    ('ğ', 'g'),
    ('ü', 'u'),
    ('ö', 'o'),
    ('ç', 'c'),
];

/// Combining dot above. Dropped only after an `i`, where it spells a decomposed `İ`.
const COMBINING_DOT_ABOVE: char = '\u{307}';

/// Normalize a test name for equality comparison.
///
/// Lowercases, folds Turkish letters to ASCII, trims and collapses internal
/// whitespace runs to a single space. Empty input is returned unchanged.
/// Idempotent: normalizing a normalized name yields the same name.
pub fn normalize_test_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut folded = String::with_capacity(name.len());
    for c in name.chars() {
        if c == 'İ' {
            folded.push('i');
            continue;
        }
        for lower in c.to_lowercase() {
            if lower == COMBINING_DOT_ABOVE && folded.ends_with('i') {
                continue;
            }
            folded.push(fold_turkish(lower));
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_turkish(c: char) -> char {
    TURKISH_FOLDS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Whether two test names refer to the same test.
pub fn test_names_match(a: &str, b: &str) -> bool {
    normalize_test_name(a) == normalize_test_name(b)
}

/// Similarity of two test names (0.0 - 1.0) over their normalized forms.
pub fn test_name_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_test_name(a);
    let b = normalize_test_name(b);

    if a == b {
        return 1.0;
    }

    // Jaro-Winkler catches typos and shared prefixes, Levenshtein overall shape
    jaro_winkler(&a, &b) * 0.6 + normalized_levenshtein(&a, &b) * 0.4
}

/// Best near match for `name` among `candidates`.
///
/// Returns `None` when no candidate reaches `min_similarity`. Ties keep the
/// earliest candidate. This is a suggestion for review only; it never
/// widens [`test_names_match`].
pub fn closest_test_name<'a, S: AsRef<str>>(
    name: &str,
    candidates: &'a [S],
    min_similarity: f64,
) -> Option<&'a str> {
    let mut best: Option<(&'a str, f64)> = None;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = test_name_similarity(name, candidate);
        if score < min_similarity {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_folding() {
        assert_eq!(normalize_test_name("KREATİNİN"), "kreatinin");
        assert_eq!(normalize_test_name("KREATININ"), "kreatinin");
        assert_eq!(normalize_test_name("kreatının"), "kreatinin");
        assert_eq!(normalize_test_name("Şeker"), "seker");
        assert_eq!(normalize_test_name("ÜRE"), "ure");
        assert_eq!(normalize_test_name("Göz İçi Basıncı"), "goz ici basinci");
        assert_eq!(normalize_test_name("Çinko"), "cinko");
        assert_eq!(normalize_test_name("Ğ"), "g");
    }

    #[test]
    fn test_decomposed_dotted_capital_i() {
        assert_eq!(normalize_test_name("KREATI\u{307}NI\u{307}N"), "kreatinin");
        assert!(test_names_match("KREATI\u{307}NI\u{307}N", "KREATİNİN"));

        // Dot above on other letters is left alone
        assert_eq!(normalize_test_name("Z\u{307}"), "z\u{307}");
        assert_eq!(normalize_test_name(&normalize_test_name("Z\u{307}")), "z\u{307}");
    }

    #[test]
    fn test_whitespace_collapsing() {
        assert_eq!(normalize_test_name("  Total   Kolesterol \t"), "total kolesterol");
        assert_eq!(normalize_test_name("   "), "");
    }

    #[test]
    fn test_empty_passes_through() {
        assert_eq!(normalize_test_name(""), "");
    }

    #[test]
    fn test_names_match_examples() {
        assert!(test_names_match("Kreatinin", "KREATİNİN"));
        assert!(test_names_match("Kreatinin", "KREATININ"));
        assert!(test_names_match("ALT (SGPT)", "alt  (sgpt)"));
        assert!(!test_names_match("ALT", "AST"));
    }

    #[test]
    fn test_similarity_exact_after_normalization() {
        assert_eq!(test_name_similarity("Üre", "URE"), 1.0);
        assert!(test_name_similarity("Hemoglobin", "Hemoglobin A1c") < 1.0);
    }

    #[test]
    fn test_closest_test_name() {
        let known = ["Kreatinin", "Glukoz", "Hemoglobin"];

        assert_eq!(closest_test_name("Kreatinın (serum)", &known, 0.7), Some("Kreatinin"));
        assert_eq!(closest_test_name("GLUKOZ", &known, 0.9), Some("Glukoz"));
        assert_eq!(closest_test_name("TSH", &known, 0.8), None);

        let empty: [&str; 0] = [];
        assert_eq!(closest_test_name("Glukoz", &empty, 0.0), None);
    }
}
