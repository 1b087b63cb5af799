use serde::Serialize;
use sqlx::FromRow;

/// Full expense row, returned by the get-one read.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub title: Option<String>,
    pub description: String,
    pub amount: f64,
    pub date: String, // caller-supplied, never parsed
    pub category: String,
    pub user_id: i64,
}

/// List projection: description, amount and date are left out.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub id: i64,
    pub title: Option<String>,
    pub category: String,
    pub user_id: i64,
}

/// Column values for an insert or a wholesale update.
#[derive(Debug, Clone)]
pub struct ExpenseFields {
    pub title: Option<String>,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub user_id: i64,
}
