//! Boundary contract for the optional LLM query planner.
//!
//! Whatever produces the plan (an LLM or hand-written rules), the contract
//! is the same: it receives a prompt naming the available tools and the
//! known categories, and must reply with either a `{tool, arguments}` plan
//! or a direct filter object. Malformed output is a recoverable
//! [`ExpenseQueryError::PlannerOutput`] error, never a panic.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::CategoryCatalog;
use crate::error::{ExpenseQueryError, Result};
use crate::query::ExpenseQuery;

/// Closed set of tools a planner may invoke. Adding a tool means adding a
/// variant here and handling it in [`PlannedTool::into_query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum PlannedTool {
    SearchExpenses(SearchExpensesArgs),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchExpensesArgs {
    #[schemars(description = "Start of the accrual period, YYYY-MM-DD")]
    pub date_from: NaiveDate,

    #[schemars(description = "End of the accrual period, YYYY-MM-DD, inclusive")]
    pub date_to: NaiveDate,

    #[serde(default)]
    #[schemars(description = "Optional free-text filter applied to the line-item description")]
    pub description: Option<String>,
}

/// Filter object a planner may return instead of a tool plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DirectFilter {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,

    #[serde(default)]
    pub description: Option<String>,

    /// Category name as the planner saw it; resolution to an identifier
    /// stays with the caller.
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerReply {
    Tool(PlannedTool),
    Filter(DirectFilter),
}

impl PlannedTool {
    pub fn into_query(self) -> ExpenseQuery {
        match self {
            PlannedTool::SearchExpenses(args) => {
                let mut query = ExpenseQuery::for_period(args.date_from, args.date_to);
                query.description = args.description;
                query
            }
        }
    }
}

impl PlannerReply {
    pub fn into_query(self) -> ExpenseQuery {
        match self {
            PlannerReply::Tool(tool) => tool.into_query(),
            PlannerReply::Filter(filter) => {
                let mut query = ExpenseQuery::for_period(filter.date_from, filter.date_to);
                query.description = filter.description.or(filter.category);
                query
            }
        }
    }
}

/// Parses raw planner output into a [`PlannerReply`].
///
/// A JSON object carrying a `tool` key is read as a tool plan; anything
/// else must be a direct filter. Either way the period must be ordered.
pub fn parse_reply(raw: &str) -> Result<PlannerReply> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| ExpenseQueryError::PlannerOutput(format!("invalid JSON: {e}")))?;

    let reply = if value.get("tool").is_some() {
        let tool: PlannedTool = serde_json::from_value(value)
            .map_err(|e| ExpenseQueryError::PlannerOutput(format!("unusable tool plan: {e}")))?;
        PlannerReply::Tool(tool)
    } else {
        let filter: DirectFilter = serde_json::from_value(value).map_err(|e| {
            ExpenseQueryError::PlannerOutput(format!("unusable filter object: {e}"))
        })?;
        PlannerReply::Filter(filter)
    };

    let (from, to) = match &reply {
        PlannerReply::Tool(PlannedTool::SearchExpenses(args)) => (args.date_from, args.date_to),
        PlannerReply::Filter(filter) => (filter.date_from, filter.date_to),
    };
    if to < from {
        return Err(ExpenseQueryError::PlannerOutput(format!(
            "period end {to} precedes start {from}"
        )));
    }

    Ok(reply)
}

/// Builds the prompt a planner needs: the question, today's date, the known
/// categories, and the JSON schema of the tool plan it must emit.
pub fn build_planner_prompt(
    question: &str,
    today: NaiveDate,
    catalog: &CategoryCatalog,
) -> Result<String> {
    let schema = schemars::schema_for!(PlannedTool);
    let schema_json = serde_json::to_string_pretty(&schema)?;

    let mut categories = String::new();
    for category in catalog.iter() {
        categories.push_str("- ");
        categories.push_str(&category.name);
        categories.push('\n');
    }

    Ok(format!(
        "Hoje é {today}. Traduza a pergunta do usuário em um plano de busca de despesas.\n\n\
         Pergunta: {question}\n\n\
         Categorias de despesa conhecidas:\n{categories}\n\
         Responda SOMENTE com um objeto JSON {{\"tool\": ..., \"arguments\": ...}} \
         que siga este esquema:\n{schema_json}\n"
    ))
}
