use log::debug;

use crate::catalog::{Category, CategoryCatalog};
use crate::normalize::normalize;

/// Finds the best category match inside a normalized question.
///
/// A category is a candidate when every whitespace token of its normalized
/// name appears somewhere in the question, order-independent. Tokens match
/// as substrings, not whole words, so a short token can match inside a
/// longer word; the tests pin that behavior. Among candidates the longest
/// normalized name wins, and equal lengths keep the earliest catalog entry.
///
/// Returns `None` when nothing matches; that is a valid, common outcome.
pub fn find_category<'a>(
    normalized_question: &str,
    catalog: &'a CategoryCatalog,
) -> Option<&'a Category> {
    let mut best: Option<(&Category, usize)> = None;

    for category in catalog.iter() {
        let name = normalize(&category.name);
        if name.is_empty() {
            continue;
        }
        if !name
            .split_whitespace()
            .all(|token| normalized_question.contains(token))
        {
            continue;
        }

        let length = name.chars().count();
        match best {
            // Strictly-greater replacement keeps the first catalog entry on ties.
            Some((_, best_length)) if length <= best_length => {}
            _ => best = Some((category, length)),
        }
    }

    if let Some((category, _)) = best {
        debug!("matched category '{}'", category.name);
    }
    best.map(|(category, _)| category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> CategoryCatalog {
        CategoryCatalog::new(names.iter().map(|name| Category::new(*name)).collect())
    }

    #[test]
    fn test_single_token_match() {
        let catalog = catalog(&["COMBUSTIVEL", "FRETES ENCOMENDAS"]);
        let found = find_category("quanto gastei com combustivel este ano", &catalog);
        assert_eq!(found.unwrap().name, "COMBUSTIVEL");
    }

    #[test]
    fn test_accented_catalog_name_matches_plain_question() {
        let catalog = catalog(&["Combustível"]);
        let found = find_category("gastos com combustivel", &catalog);
        assert!(found.is_some());
    }

    #[test]
    fn test_all_tokens_required_order_independent() {
        let catalog = catalog(&["FRETES ENCOMENDAS"]);
        assert!(find_category("encomendas e fretes do mes", &catalog).is_some());
        assert!(find_category("somente fretes", &catalog).is_none());
    }

    #[test]
    fn test_singular_partial_token_does_not_match() {
        // "frete" is not a superstring of the token "fretes", so the
        // category stays unmatched for the singular form.
        let catalog = catalog(&["FRETES ENCOMENDAS"]);
        assert!(find_category("gastos com frete no mes passado", &catalog).is_none());
    }

    #[test]
    fn test_short_token_matches_inside_longer_word() {
        // Tokens match as substrings, so "luz" matches inside "luzes".
        let catalog = catalog(&["LUZ"]);
        assert!(find_category("troca das luzes da loja", &catalog).is_some());
    }

    #[test]
    fn test_longest_candidate_wins() {
        let catalog = catalog(&["COMBUSTIVEL", "COMBUSTIVEL DA FROTA"]);
        let found = find_category("gastos com combustivel da frota este mes", &catalog);
        assert_eq!(found.unwrap().name, "COMBUSTIVEL DA FROTA");
    }

    #[test]
    fn test_equal_length_tie_keeps_catalog_order() {
        let catalog = catalog(&["ABCD", "DCBA"]);
        let found = find_category("abcd dcba", &catalog);
        assert_eq!(found.unwrap().name, "ABCD");
    }

    #[test]
    fn test_empty_catalog_matches_nothing() {
        let catalog = CategoryCatalog::default();
        assert!(find_category("quanto gastei com combustivel", &catalog).is_none());
    }

    #[test]
    fn test_blank_category_name_never_matches() {
        let catalog = catalog(&["   ", "LUZ"]);
        let found = find_category("conta de luz", &catalog);
        assert_eq!(found.unwrap().name, "LUZ");
    }

    #[test]
    fn test_match_tokens_are_substrings_of_question() {
        let catalog = catalog(&["FRETES ENCOMENDAS", "COMBUSTIVEL"]);
        let question = "quanto custaram fretes e encomendas";
        if let Some(category) = find_category(question, &catalog) {
            for token in normalize(&category.name).split_whitespace() {
                assert!(question.contains(token));
            }
        } else {
            panic!("expected a match");
        }
    }
}
