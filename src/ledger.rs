//! Read-only view of the ledger search boundary.
//!
//! The HTTP transport lives with the host (or behind the `remote` feature);
//! this module only fixes the wire shapes the core consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Search endpoint for payable financial events.
pub const PAYABLES_SEARCH_ENDPOINT: &str = "financeiro/eventos-financeiros/contas-a-pagar/buscar";

/// Listing endpoint for categories.
pub const CATEGORIES_ENDPOINT: &str = "categorias";

/// One monetary record returned by the payables search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "total", default)]
    pub amount: f64,

    #[serde(rename = "descricao", default)]
    pub description: Option<String>,

    /// Accounting-period date (when the expense is recognized).
    #[serde(rename = "data_competencia", default)]
    pub accrual_date: Option<NaiveDate>,

    #[serde(rename = "data_vencimento", default)]
    pub due_date: Option<NaiveDate>,
}

impl LineItem {
    /// The date shown for this item, preferring the accrual date over the
    /// due date.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.accrual_date.or(self.due_date)
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerPage {
    #[serde(rename = "itens", default)]
    pub items: Vec<LineItem>,

    #[serde(rename = "total_itens", default)]
    pub total_items: Option<u64>,
}
