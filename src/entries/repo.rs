use anyhow::Result;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct NutritionEntry {
    pub id: i64,
    pub date: String,
    pub meal_type: String,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodHistoryEntry {
    pub id: i64,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub last_used: String,
    pub use_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewEntry<'a> {
    pub meal_type: &'a str,
    pub food_name: &'a str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub async fn list_for_date(db: &SqlitePool, date: &str) -> Result<Vec<NutritionEntry>> {
    let rows = sqlx::query_as::<_, NutritionEntry>(
        r#"
        SELECT id, date, meal_type, food_name, calories, protein, carbs, fat, created_at
        FROM nutrition_entries
        WHERE date = ?
        ORDER BY created_at, id
        "#,
    )
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &SqlitePool, date: &str, entry: &NewEntry<'_>) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO nutrition_entries (date, meal_type, food_name, calories, protein, carbs, fat)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(date)
    .bind(entry.meal_type)
    .bind(entry.food_name)
    .bind(entry.calories)
    .bind(entry.protein)
    .bind(entry.carbs)
    .bind(entry.fat)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn delete(db: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM nutrition_entries WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Upsert into the food-history cache: a repeated food name bumps its use
/// counter and last-used time, a never-seen one starts at 1. Macro values
/// are captured on first use only.
pub async fn record_food_use(db: &SqlitePool, entry: &NewEntry<'_>) -> Result<()> {
    let mut tx = db.begin().await?;
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM food_history WHERE food_name = ?")
        .bind(entry.food_name)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        sqlx::query(
            r#"
            UPDATE food_history
            SET use_count = use_count + 1, last_used = CURRENT_TIMESTAMP
            WHERE food_name = ?
            "#,
        )
        .bind(entry.food_name)
        .execute(&mut *tx)
        .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO food_history (food_name, calories, protein, carbs, fat)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.food_name)
        .bind(entry.calories)
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fat)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn recent_foods(db: &SqlitePool, limit: i64) -> Result<Vec<FoodHistoryEntry>> {
    let rows = sqlx::query_as::<_, FoodHistoryEntry>(
        r#"
        SELECT id, food_name, calories, protein, carbs, fat, last_used, use_count
        FROM food_history
        ORDER BY last_used DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
