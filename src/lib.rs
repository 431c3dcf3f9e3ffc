//! # Expense Query Builder
//!
//! A library for translating free-text questions about business expenses
//! ("quanto gastei com combustivel este ano?") into concrete, paginated
//! queries against an external financial ledger, and for aggregating the
//! returned line-items into a human-readable answer.
//!
//! ## Core Concepts
//!
//! - **Normalization**: every comparison runs on accent-stripped, lowercased text
//! - **Period**: a question maps to one inclusive date range from a fixed phrase set
//! - **Catalog**: the externally-sourced list of known expense category names
//! - **Residual**: the text left after removing recognized phrases, used as a free-text filter
//! - **Collaborators**: OAuth, the ledger transport, and the LLM planner stay outside;
//!   this crate owns only the deterministic translation and aggregation
//!
//! ## Example
//!
//! ```rust,ignore
//! use expense_query_builder::*;
//! use chrono::NaiveDate;
//!
//! let catalog = CategoryCatalog::from_file("categorias.txt")?;
//! let today = NaiveDate::from_ymd_opt(2025, 7, 25).unwrap();
//!
//! let (analysis, query) = translate_question(
//!     "quanto gastei com combustivel este ano?",
//!     &catalog,
//!     today,
//! );
//!
//! // Hand `query.to_query_params()` to the ledger collaborator, then:
//! let summary = summarize(&page.items, &analysis);
//! println!("{}", summary.text);
//! ```

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod matcher;
pub mod normalize;
pub mod period;
pub mod planner;
pub mod query;
pub mod summary;

#[cfg(feature = "remote")]
pub mod remote;

pub use analyzer::{analyze, Analysis, LEAD_IN_PHRASES};
pub use catalog::{CatalogCache, Category, CategoryCatalog, RemoteCategory, DEFAULT_CATALOG_TTL};
pub use error::{ExpenseQueryError, Result};
pub use ledger::{LedgerPage, LineItem};
pub use matcher::find_category;
pub use normalize::normalize;
pub use period::{Period, PERIOD_PHRASES};
pub use planner::{
    build_planner_prompt, parse_reply, DirectFilter, PlannedTool, PlannerReply, SearchExpensesArgs,
};
pub use query::{ExpenseQuery, DEFAULT_PAGE_SIZE};
pub use summary::{format_brl, summarize, Summary, EMPTY_RESULT_MESSAGE, PREVIEW_LIMIT};

use chrono::NaiveDate;
use log::{debug, info};

/// One-call translation: question in, analysis plus ready-to-send query out.
pub struct QuestionTranslator;

impl QuestionTranslator {
    pub fn translate(
        question: &str,
        catalog: &CategoryCatalog,
        today: NaiveDate,
    ) -> (Analysis, ExpenseQuery) {
        info!("translating question against {} categories", catalog.len());

        let analysis = analyze(question, catalog, today);
        let query = ExpenseQuery::from_analysis(&analysis);

        debug!(
            "query covers {}..{}, {} category filter, {} description filter",
            query.accrual_from,
            query.accrual_to,
            if query.category_ids.is_some() { "with" } else { "no" },
            if query.description.is_some() { "with" } else { "no" },
        );

        (analysis, query)
    }
}

pub fn translate_question(
    question: &str,
    catalog: &CategoryCatalog,
    today: NaiveDate,
) -> (Analysis, ExpenseQuery) {
    QuestionTranslator::translate(question, catalog, today)
}
