use sqlx::SqlitePool;

use super::repo_types::{Expense, ExpenseFields, ExpenseSummary};
use crate::db::StoreError;

const ENTITY: &str = "Expense";

/// Insert an expense. `user_id` is stored as given; no user lookup.
pub async fn insert(db: &SqlitePool, fields: &ExpenseFields) -> Result<i64, StoreError> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO expenses (title, description, amount, date, category, user_id)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.amount)
    .bind(&fields.date)
    .bind(&fields.category)
    .bind(fields.user_id)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn list(db: &SqlitePool) -> Result<Vec<ExpenseSummary>, StoreError> {
    let rows = sqlx::query_as::<_, ExpenseSummary>(
        "SELECT id, title, category, user_id FROM expenses ORDER BY id",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &SqlitePool, id: i64) -> Result<Expense, StoreError> {
    sqlx::query_as::<_, Expense>(
        r#"
        SELECT id, title, description, amount, date, category, user_id
          FROM expenses
         WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| StoreError::not_found(ENTITY))
}

pub async fn exists(db: &SqlitePool, id: i64) -> Result<bool, StoreError> {
    let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM expenses WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(found.is_some())
}

/// Overwrite every column of an expense. A missing id is a no-op.
pub async fn update(db: &SqlitePool, id: i64, fields: &ExpenseFields) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        UPDATE expenses
           SET title = ?, description = ?, amount = ?, date = ?, category = ?, user_id = ?
         WHERE id = ?
        "#,
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.amount)
    .bind(&fields.date)
    .bind(&fields.category)
    .bind(fields.user_id)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let res = sqlx::query("DELETE FROM expenses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    if res.rows_affected() == 0 {
        return Err(StoreError::not_found(ENTITY));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    fn lunch(user_id: i64) -> ExpenseFields {
        ExpenseFields {
            title: Some("Lunch".into()),
            description: "Sandwich and coffee".into(),
            amount: 12.5,
            date: "2024-03-01".into(),
            category: "Food".into(),
            user_id,
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_full_record() {
        let st = AppState::in_memory().await;
        let id = insert(&st.db, &lunch(1)).await.unwrap();

        let e = get(&st.db, id).await.unwrap();
        assert_eq!(
            e,
            Expense {
                id,
                title: Some("Lunch".into()),
                description: "Sandwich and coffee".into(),
                amount: 12.5,
                date: "2024-03-01".into(),
                category: "Food".into(),
                user_id: 1,
            }
        );
    }

    #[tokio::test]
    async fn insert_accepts_unknown_user_and_null_title() {
        let st = AppState::in_memory().await;
        let mut fields = lunch(12345);
        fields.title = None;
        let id = insert(&st.db, &fields).await.unwrap();

        let e = get(&st.db, id).await.unwrap();
        assert_eq!(e.user_id, 12345);
        assert!(e.title.is_none());
    }

    #[tokio::test]
    async fn list_is_partial_projection_of_every_row() {
        let st = AppState::in_memory().await;
        insert(&st.db, &lunch(1)).await.unwrap();
        insert(&st.db, &lunch(2)).await.unwrap();

        let items = list(&st.db).await.unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            let full = get(&st.db, item.id).await.unwrap();
            assert_eq!(item.title, full.title);
            assert_eq!(item.category, full.category);
            assert_eq!(item.user_id, full.user_id);

            let json = serde_json::to_value(&item).unwrap();
            let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
            keys.sort();
            assert_eq!(keys, vec!["category", "id", "title", "userId"]);
        }
    }

    #[tokio::test]
    async fn update_with_unknown_user_succeeds() {
        let st = AppState::in_memory().await;
        let id = insert(&st.db, &lunch(1)).await.unwrap();

        let mut fields = lunch(777);
        fields.amount = 20.0;
        update(&st.db, id, &fields).await.unwrap();

        let e = get(&st.db, id).await.unwrap();
        assert_eq!(e.user_id, 777);
        assert_eq!(e.amount, 20.0);
    }

    #[tokio::test]
    async fn update_without_table_is_operational() {
        let st = AppState::in_memory().await;
        sqlx::query("DROP TABLE expenses").execute(&st.db).await.unwrap();

        let err = update(&st.db, 1, &lunch(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Operational(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let st = AppState::in_memory().await;
        let id = insert(&st.db, &lunch(1)).await.unwrap();
        assert!(exists(&st.db, id).await.unwrap());

        delete(&st.db, id).await.unwrap();
        assert!(!exists(&st.db, id).await.unwrap());
        assert!(matches!(
            delete(&st.db, id).await.unwrap_err(),
            StoreError::NotFound { entity: "Expense" }
        ));
    }
}
