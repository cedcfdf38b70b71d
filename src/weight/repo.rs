use anyhow::Result;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeightEntry {
    pub id: i64,
    pub date: String,
    pub weight: f64,
    pub created_at: String,
}

pub async fn list(db: &SqlitePool, limit: i64) -> Result<Vec<WeightEntry>> {
    let rows = sqlx::query_as::<_, WeightEntry>(
        r#"
        SELECT id, date, weight, created_at
        FROM weight_log
        ORDER BY date DESC, created_at DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &SqlitePool, date: &str, weight: f64) -> Result<i64> {
    let result = sqlx::query("INSERT INTO weight_log (date, weight) VALUES (?, ?)")
        .bind(date)
        .bind(weight)
        .execute(db)
        .await?;
    Ok(result.last_insert_rowid())
}
