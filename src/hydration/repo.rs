use anyhow::Result;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HydrationEntry {
    pub id: i64,
    pub date: String,
    pub cups: i64,
    pub updated_at: String,
}

pub async fn get_for_date(db: &SqlitePool, date: &str) -> Result<Option<HydrationEntry>> {
    let row = sqlx::query_as::<_, HydrationEntry>(
        "SELECT id, date, cups, updated_at FROM hydration_log WHERE date = ?",
    )
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn set_cups(db: &SqlitePool, date: &str, cups: i64) -> Result<()> {
    let mut tx = db.begin().await?;
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM hydration_log WHERE date = ?")
        .bind(date)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        sqlx::query(
            "UPDATE hydration_log SET cups = ?, updated_at = CURRENT_TIMESTAMP WHERE date = ?",
        )
        .bind(cups)
        .bind(date)
        .execute(&mut *tx)
        .await?;
    } else {
        sqlx::query("INSERT INTO hydration_log (date, cups) VALUES (?, ?)")
            .bind(date)
            .bind(cups)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
