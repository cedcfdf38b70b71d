use anyhow::Result;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyScores {
    pub id: i64,
    pub date: String,
    pub readiness_score: Option<i64>,
    pub sleep_score: Option<i64>,
    pub activity_score: Option<i64>,
    pub steps: Option<i64>,
    pub total_calories: Option<f64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreFields {
    pub readiness_score: Option<i64>,
    pub sleep_score: Option<i64>,
    pub activity_score: Option<i64>,
    pub steps: Option<i64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Workout {
    pub id: i64,
    pub date: String,
    pub activity: String,
    pub calories: f64,
    pub duration: i64,
    pub distance: f64,
    pub start_time: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub activity: String,
    pub calories: f64,
    pub duration: i64,
    pub distance: f64,
    pub start_time: Option<String>,
}

pub async fn get_scores(db: &SqlitePool, date: &str) -> Result<Option<DailyScores>> {
    let row = sqlx::query_as::<_, DailyScores>(
        r#"
        SELECT id, date, readiness_score, sleep_score, activity_score, steps,
               total_calories, created_at
        FROM oura_scores
        WHERE date = ?
        "#,
    )
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Manual upsert of the four score fields. An update leaves
/// `total_calories` alone; only the sync path writes it.
pub async fn upsert_scores(db: &SqlitePool, date: &str, s: &ScoreFields) -> Result<()> {
    let mut tx = db.begin().await?;
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM oura_scores WHERE date = ?")
        .bind(date)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        sqlx::query(
            r#"
            UPDATE oura_scores
            SET readiness_score = ?, sleep_score = ?, activity_score = ?, steps = ?
            WHERE date = ?
            "#,
        )
        .bind(s.readiness_score)
        .bind(s.sleep_score)
        .bind(s.activity_score)
        .bind(s.steps)
        .bind(date)
        .execute(&mut *tx)
        .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO oura_scores (date, readiness_score, sleep_score, activity_score, steps)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(date)
        .bind(s.readiness_score)
        .bind(s.sleep_score)
        .bind(s.activity_score)
        .bind(s.steps)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Sync-path upsert: writes all five metric columns, NULLs included, so a
/// re-sync always reflects the provider's latest answer for the date.
pub async fn upsert_synced_scores(
    db: &SqlitePool,
    date: &str,
    s: &ScoreFields,
    total_calories: Option<f64>,
) -> Result<()> {
    let mut tx = db.begin().await?;
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM oura_scores WHERE date = ?")
        .bind(date)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        sqlx::query(
            r#"
            UPDATE oura_scores
            SET readiness_score = ?, sleep_score = ?, activity_score = ?, steps = ?,
                total_calories = ?
            WHERE date = ?
            "#,
        )
        .bind(s.readiness_score)
        .bind(s.sleep_score)
        .bind(s.activity_score)
        .bind(s.steps)
        .bind(total_calories)
        .bind(date)
        .execute(&mut *tx)
        .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO oura_scores
                (date, readiness_score, sleep_score, activity_score, steps, total_calories)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(date)
        .bind(s.readiness_score)
        .bind(s.sleep_score)
        .bind(s.activity_score)
        .bind(s.steps)
        .bind(total_calories)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub async fn list_workouts(db: &SqlitePool, date: &str) -> Result<Vec<Workout>> {
    let rows = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, date, activity, calories, duration, distance, start_time, created_at
        FROM oura_workouts
        WHERE date = ?
        ORDER BY start_time
        "#,
    )
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Replace-set write: all rows for the date go away and the new set goes in,
/// atomically. An empty set therefore clears the date.
pub async fn replace_workouts(db: &SqlitePool, date: &str, workouts: &[NewWorkout]) -> Result<()> {
    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM oura_workouts WHERE date = ?")
        .bind(date)
        .execute(&mut *tx)
        .await?;
    for w in workouts {
        sqlx::query(
            r#"
            INSERT INTO oura_workouts (date, activity, calories, duration, distance, start_time)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(date)
        .bind(&w.activity)
        .bind(w.calories)
        .bind(w.duration)
        .bind(w.distance)
        .bind(&w.start_time)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
