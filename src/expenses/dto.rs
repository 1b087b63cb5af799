use serde::Deserialize;

use super::repo_types::ExpenseFields;
use crate::extractors::RequestBody;

/// Expense payload. Only `title` is optional; `user_id` is accepted as an
/// alias for `userId`.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: i64,
}

impl RequestBody for ExpenseRequest {
    const MISSING: &'static str = "No data found to create an expense!";
}

/// Same shape as a create, with its own "no data" message.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct UpdateExpenseRequest(pub ExpenseRequest);

impl RequestBody for UpdateExpenseRequest {
    const MISSING: &'static str = "No data found to update the expense!";
}

impl From<ExpenseRequest> for ExpenseFields {
    fn from(r: ExpenseRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            amount: r.amount,
            date: r.date,
            category: r.category,
            user_id: r.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_user_id_spellings() {
        let camel: ExpenseRequest = serde_json::from_str(
            r#"{"description":"d","amount":1,"date":"x","category":"c","userId":3}"#,
        )
        .unwrap();
        let snake: ExpenseRequest = serde_json::from_str(
            r#"{"description":"d","amount":1.5,"date":"x","category":"c","user_id":4}"#,
        )
        .unwrap();
        assert_eq!(camel.user_id, 3);
        assert_eq!(camel.amount, 1.0);
        assert!(camel.title.is_none());
        assert_eq!(snake.user_id, 4);
    }

    #[test]
    fn update_request_is_transparent() {
        let UpdateExpenseRequest(inner) = serde_json::from_str(
            r#"{"title":"t","description":"d","amount":2,"date":"x","category":"c","userId":1}"#,
        )
        .unwrap();
        assert_eq!(inner.title.as_deref(), Some("t"));
    }

    #[test]
    fn missing_description_is_rejected() {
        let err = serde_json::from_str::<ExpenseRequest>(
            r#"{"amount":2,"date":"x","category":"c","userId":1}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("description"));
    }
}
