//! Name normalization for similarity grouping.
//!
//! Two keys are derived from a name:
//!
//! | Key | Steps | Example |
//! |-----|-------|---------|
//! | [`exact_name_key`] | trim, lowercase | `" Café Noir "` → `"café noir"` |
//! | [`normalize`] | NFD, strip marks, lowercase, keep `[a-z0-9\s]`, collapse spaces | `"Café-Noir!"` → `"cafenoir"` |
//!
//! Slugs and storage paths are compared verbatim and never pass through here.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Fold a name down to its accent- and punctuation-insensitive form.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let stripped = DISALLOWED.replace_all(&folded, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Case-insensitive key for exact name matching.
///
/// Accents and punctuation are kept, so `"Café"` and `"Cafe"` differ here.
/// Returns `None` for blank names so they are never grouped together.
pub fn exact_name_key(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalized key, or `None` when nothing survives normalization.
pub fn normalized_key(text: &str) -> Option<String> {
    let key = normalize(text);
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("Café Noir"), "cafe noir");
        assert_eq!(normalize("ÉLODIE Müller"), "elodie muller");
    }

    #[test]
    fn test_drops_punctuation_and_collapses_spaces() {
        assert_eq!(normalize("  Les   Misérables!  "), "les miserables");
        assert_eq!(normalize("Jean-Baptiste\tLully"), "jeanbaptiste lully");
        assert_eq!(normalize("L'Été, op. 8"), "lete op 8");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!…"), "");
        assert_eq!(normalized_key("--"), None);
    }

    #[test]
    fn test_idempotent() {
        for input in ["Café Noir", "  Ñandú  Äpfel ", "Dvořák: Symphony No. 9", "", "ß ø"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_exact_name_key_keeps_accents() {
        assert_eq!(exact_name_key(" Café Noir "), Some("café noir".to_string()));
        assert_ne!(exact_name_key("Café Noir"), exact_name_key("Cafe Noir"));
        assert_eq!(exact_name_key("   "), None);
    }
}
