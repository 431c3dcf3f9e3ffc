//! Accent- and case-insensitive text canonicalization.
//!
//! Every matching step in this crate compares normalized text; comparing
//! un-normalized strings is a correctness bug.

use unicode_normalization::UnicodeNormalization;

/// Canonical form used for all phrase and category comparisons: NFKD
/// decomposition, non-ASCII remnants stripped, lowercased, trimmed.
///
/// Never fails; empty input yields an empty string. Idempotent.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(char::is_ascii)
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Removes every occurrence of `needle` from `haystack`, matching with the
/// same folding as [`normalize`] but deleting the original-case spans.
/// The result is trimmed.
///
/// This is what lets residual extraction delete an uppercase, accented
/// category display name from a lowercase question.
pub fn strip_folded(haystack: &str, needle: &str) -> String {
    let folded_needle: Vec<char> = fold(needle).into_iter().map(|(_, c)| c).collect();
    if folded_needle.is_empty() {
        return haystack.trim().to_string();
    }

    let folded = fold(haystack);
    let mut removed: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i + folded_needle.len() <= folded.len() {
        let window = &folded[i..i + folded_needle.len()];
        if window.iter().map(|(_, c)| *c).eq(folded_needle.iter().copied()) {
            let start = folded[i].0;
            let after = i + folded_needle.len();
            // Combining marks carry the byte offset of their base character,
            // so the raw span runs up to the next folded character's offset.
            let end = folded.get(after).map(|(idx, _)| *idx).unwrap_or(haystack.len());
            removed.push((start, end));
            i = after;
        } else {
            i += 1;
        }
    }

    if removed.is_empty() {
        return haystack.trim().to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    for (start, end) in removed {
        out.push_str(&haystack[cursor..start]);
        cursor = end;
    }
    out.push_str(&haystack[cursor..]);
    out.trim().to_string()
}

/// Folds each character the way [`normalize`] does, keeping the byte offset
/// of the raw character every folded character came from.
fn fold(s: &str) -> Vec<(usize, char)> {
    let mut out = Vec::new();
    for (idx, ch) in s.char_indices() {
        for folded in std::iter::once(ch)
            .nfkd()
            .filter(char::is_ascii)
            .flat_map(char::to_lowercase)
        {
            out.push((idx, folded));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("Combustível"), "combustivel");
        assert_eq!(normalize("  MÊS PASSADO  "), "mes passado");
        assert_eq!(normalize("ções"), "coes");
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["Quanto gastei com combustível?", "FRETES ENCOMENDAS", "ÁÉÍÓÚ çãõ"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_strip_folded_case_and_accent_insensitive() {
        assert_eq!(
            strip_folded("quanto gastei com combustível este ano", "COMBUSTIVEL"),
            "quanto gastei com  este ano"
        );
    }

    #[test]
    fn test_strip_folded_preserves_original_case_elsewhere() {
        assert_eq!(strip_folded("Gastos com Frete", "gastos com"), "Frete");
    }

    #[test]
    fn test_strip_folded_removes_all_occurrences() {
        assert_eq!(strip_folded("abc abc abc", "abc"), "");
        assert_eq!(strip_folded("x abc y abc z", "abc"), "x  y  z");
    }

    #[test]
    fn test_strip_folded_no_match_trims_only() {
        assert_eq!(strip_folded("  frete no  ", "combustivel"), "frete no");
    }

    #[test]
    fn test_strip_folded_empty_needle() {
        assert_eq!(strip_folded(" abc ", ""), "abc");
    }
}
