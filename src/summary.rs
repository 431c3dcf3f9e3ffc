//! Deterministic aggregation and formatting of ledger line-items.

use serde::Serialize;

use crate::analyzer::Analysis;
use crate::ledger::LineItem;

/// Fixed reply when the search matched nothing.
pub const EMPTY_RESULT_MESSAGE: &str = "❌ Nenhum gasto encontrado para os filtros informados.";

/// How many line-items the summary previews.
pub const PREVIEW_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub text: String,
    pub total: f64,
    pub count: usize,
}

/// Aggregates a page of line-items into a total, a count, and a markdown
/// summary previewing the first items in page order.
///
/// Pure and order-preserving: identical inputs produce identical output,
/// and the items are never re-sorted or mutated. Zero items yield the fixed
/// [`EMPTY_RESULT_MESSAGE`] with no total line.
pub fn summarize(items: &[LineItem], analysis: &Analysis) -> Summary {
    if items.is_empty() {
        return Summary {
            text: EMPTY_RESULT_MESSAGE.to_string(),
            total: 0.0,
            count: 0,
        };
    }

    let total: f64 = items.iter().map(|item| item.amount).sum();

    let mut text = format!("💸 **Total de gastos: {}**\n", format_brl(total));
    if let Some(category) = &analysis.category {
        text.push_str(&format!("Categoria: **{}**\n", category.name));
    }
    if let Some(residual) = &analysis.residual {
        text.push_str(&format!("Descrição: **{}**\n", residual));
    }
    text.push_str(&format!("📝 **{}** lançamentos encontrados.\n\n", items.len()));

    for item in items.iter().take(PREVIEW_LIMIT) {
        let date = item
            .effective_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let description = item.description.as_deref().unwrap_or("Sem descrição");
        text.push_str(&format!(
            "- *{}*: {} ({})\n",
            date,
            description,
            format_brl(item.amount)
        ));
    }

    Summary {
        text,
        total,
        count: items.len(),
    }
}

/// Formats an amount as Brazilian currency: `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;
    let integer = cents / 100;
    let fraction = cents % 100;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped},{fraction:02}")
}
