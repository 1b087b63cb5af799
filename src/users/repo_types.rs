use serde::Serialize;
use sqlx::FromRow;

/// Public projection of a user row. Both the list and the get-one reads
/// return only these two columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i64,   // store-assigned
    pub name: String,
}
