use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, CategoryCatalog};
use crate::matcher::find_category;
use crate::normalize::{normalize, strip_folded};
use crate::period::{Period, PERIOD_PHRASES};

/// Boilerplate lead-ins removed from a question before the leftover text is
/// kept as a free-text description filter.
pub const LEAD_IN_PHRASES: [&str; 5] = [
    "quanto gastei de",
    "quanto gastei com",
    "gastos com",
    "custo de",
    "despesas com",
];

/// The translation of one question: a concrete period, the best category
/// match, and whatever free text is left over.
///
/// Serializable so hosts can surface it as an audit trace next to the
/// formatted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub period: Period,
    pub category: Option<Category>,
    pub residual: Option<String>,
}

impl Analysis {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Translates a free-text question into an [`Analysis`].
///
/// The catalog may be empty; an unmatched category is a valid outcome, not
/// an error. `today` is injected for testability.
///
/// Residual text is derived from the raw question by deleting, in this
/// order: the matched category's display name, the lead-in phrases, the
/// recognized period phrases, and any question mark. Deletions match
/// accent- and case-insensitively but remove the original spans.
pub fn analyze(question: &str, catalog: &CategoryCatalog, today: NaiveDate) -> Analysis {
    let question_norm = normalize(question);
    let period = Period::interpret(&question_norm, today);
    let category = find_category(&question_norm, catalog).cloned();

    let mut residual = question.trim().to_string();
    if let Some(category) = &category {
        residual = strip_folded(&residual, &category.name);
    }
    for phrase in LEAD_IN_PHRASES {
        residual = strip_folded(&residual, phrase);
    }
    for phrase in PERIOD_PHRASES {
        residual = strip_folded(&residual, phrase);
    }
    residual = strip_folded(&residual, "?");

    debug!(
        "analyzed question: period {}..{}, category {:?}, residual {:?}",
        period.start,
        period.end,
        category.as_ref().map(|c| c.name.as_str()),
        residual
    );

    Analysis {
        period,
        category,
        residual: if residual.is_empty() {
            None
        } else {
            Some(residual)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn catalog(names: &[&str]) -> CategoryCatalog {
        CategoryCatalog::new(names.iter().map(|name| Category::new(*name)).collect())
    }

    #[test]
    fn test_fuel_question_this_year() {
        let catalog = catalog(&["COMBUSTIVEL"]);
        let analysis = analyze(
            "quanto gastei com combustivel este ano",
            &catalog,
            date(2025, 7, 25),
        );

        assert_eq!(analysis.period.start, date(2025, 1, 1));
        assert_eq!(analysis.period.end, date(2025, 7, 25));
        assert_eq!(analysis.category.as_ref().unwrap().name, "COMBUSTIVEL");
        assert_eq!(analysis.residual, None);
    }

    #[test]
    fn test_accented_question_and_trailing_question_mark() {
        let catalog = catalog(&["COMBUSTÍVEL"]);
        let analysis = analyze(
            "Quanto gastei com combustível este ano?",
            &catalog,
            date(2025, 7, 25),
        );

        assert!(analysis.category.is_some());
        assert_eq!(analysis.residual, None);
    }

    #[test]
    fn test_residual_keeps_unrecognized_words() {
        let catalog = catalog(&["COMBUSTIVEL"]);
        let analysis = analyze(
            "quanto gastei com combustivel da hilux este ano",
            &catalog,
            date(2025, 7, 25),
        );

        assert_eq!(analysis.residual.as_deref(), Some("da hilux"));
    }

    #[test]
    fn test_empty_catalog_leaves_full_residual() {
        let analysis = analyze(
            "combustivel da hilux este ano",
            &CategoryCatalog::default(),
            date(2025, 7, 25),
        );

        assert_eq!(analysis.category, None);
        assert_eq!(analysis.residual.as_deref(), Some("combustivel da hilux"));
    }

    #[test]
    fn test_unmatched_category_last_month() {
        let catalog = catalog(&["FRETES ENCOMENDAS"]);
        let analysis = analyze(
            "gastos com frete no mes passado",
            &catalog,
            date(2025, 7, 25),
        );

        assert_eq!(analysis.period.start, date(2025, 6, 1));
        assert_eq!(analysis.period.end, date(2025, 6, 30));
        assert_eq!(analysis.category, None);
        assert_eq!(analysis.residual.as_deref(), Some("frete no"));
    }

    #[test]
    fn test_analysis_serializes_for_tracing() {
        let catalog = catalog(&["COMBUSTIVEL"]);
        let analysis = analyze("combustivel este mes", &catalog, date(2025, 7, 25));

        let json = analysis.to_json().unwrap();
        assert!(json.contains("\"COMBUSTIVEL\""));
        assert!(json.contains("2025-07-01"));
    }
}
