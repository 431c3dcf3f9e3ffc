use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzer::Analysis;

/// Page size used for every search; one page covers the preview and the
/// aggregate for typical result sets.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

// The search endpoint insists on due-date bounds even when the accrual
// period is the real filter, so a window this wide acts as a no-op.
fn due_date_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()
}

fn due_date_ceiling() -> NaiveDate {
    NaiveDate::from_ymd_opt(2035, 12, 31).unwrap()
}

/// The parameter set for one paginated payables search. Built fresh per
/// question and never mutated afterwards; pagination composes a new value
/// via [`ExpenseQuery::with_page`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseQuery {
    pub due_date_from: NaiveDate,
    pub due_date_to: NaiveDate,
    pub accrual_from: NaiveDate,
    pub accrual_to: NaiveDate,
    pub page: u32,
    pub page_size: u32,
    pub category_ids: Option<Vec<String>>,
    pub description: Option<String>,
}

impl ExpenseQuery {
    /// Base query over an accrual period, first page, no filters.
    pub fn for_period(accrual_from: NaiveDate, accrual_to: NaiveDate) -> Self {
        Self {
            due_date_from: due_date_floor(),
            due_date_to: due_date_ceiling(),
            accrual_from,
            accrual_to,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            category_ids: None,
            description: None,
        }
    }

    /// Assembles the query for an analyzed question.
    ///
    /// The residual text becomes the description filter. A matched category
    /// contributes its identifier when resolved; an unresolved category
    /// falls back to its display name as the description filter instead,
    /// overriding the residual.
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let mut query = Self::for_period(analysis.period.start, analysis.period.end);
        query.description = analysis.residual.clone();

        if let Some(category) = &analysis.category {
            match &category.id {
                Some(id) => query.category_ids = Some(vec![id.clone()]),
                None => query.description = Some(category.name.clone()),
            }
        }
        query
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Renders the wire parameter pairs the ledger API expects.
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            param("data_vencimento_de", self.due_date_from),
            param("data_vencimento_ate", self.due_date_to),
            param("data_competencia_de", self.accrual_from),
            param("data_competencia_ate", self.accrual_to),
            ("pagina".to_string(), self.page.to_string()),
            ("tamanho_pagina".to_string(), self.page_size.to_string()),
        ];
        if let Some(ids) = &self.category_ids {
            for id in ids {
                params.push(("ids_categorias".to_string(), id.clone()));
            }
        }
        if let Some(description) = &self.description {
            params.push(("descricao".to_string(), description.clone()));
        }
        params
    }
}

fn param(name: &str, date: NaiveDate) -> (String, String) {
    (name.to_string(), date.format("%Y-%m-%d").to_string())
}
