//! Reconciles one calendar date of ring data into the local store.

use chrono::{DateTime, Days, NaiveDate};
use sqlx::SqlitePool;
use tracing::{error, info};

use super::client::{OuraApi, WorkoutRecord};
use super::repo::{self, NewWorkout, ScoreFields};

/// Full sync for one date: daily scores, then workouts. Each step has its
/// own error boundary so a failed fetch never aborts the process or the
/// remaining steps.
pub async fn run(db: &SqlitePool, api: &dyn OuraApi, date: NaiveDate) {
    info!(%date, "starting Oura sync");
    if let Err(e) = sync_daily_scores(db, api, date).await {
        error!(error = %e, %date, "daily score sync failed");
    }
    if let Err(e) = sync_workouts(db, api, date).await {
        error!(error = %e, %date, "workout sync failed");
    }
    info!(%date, "Oura sync finished");
}

pub async fn sync_daily_scores(
    db: &SqlitePool,
    api: &dyn OuraApi,
    date: NaiveDate,
) -> anyhow::Result<()> {
    // The provider's daily records can land on either side of a date
    // boundary, so query a padded window and match the exact day here.
    let start = date - Days::new(2);
    let end = date + Days::new(1);

    let (readiness, sleep, activity) = tokio::try_join!(
        api.daily_readiness(start, end),
        api.daily_sleep(start, end),
        api.daily_activity(start, end),
    )?;

    let day = date.to_string();
    let readiness = readiness.into_iter().find(|r| r.day == day);
    let sleep = sleep.into_iter().find(|s| s.day == day);
    let activity = activity.into_iter().find(|a| a.day == day);

    let scores = ScoreFields {
        readiness_score: readiness.as_ref().and_then(|r| r.score),
        sleep_score: sleep.as_ref().and_then(|s| s.score),
        activity_score: activity.as_ref().and_then(|a| a.score),
        steps: activity.as_ref().and_then(|a| a.steps),
    };
    // Active (exercise) calories, not the provider's metabolic+active total.
    let calories = activity.as_ref().and_then(|a| a.active_calories);

    repo::upsert_synced_scores(db, &day, &scores, calories).await?;
    info!(
        %date,
        readiness = ?scores.readiness_score,
        sleep = ?scores.sleep_score,
        activity = ?scores.activity_score,
        steps = ?scores.steps,
        active_calories = ?calories,
        "daily scores synced"
    );
    Ok(())
}

pub async fn sync_workouts(
    db: &SqlitePool,
    api: &dyn OuraApi,
    date: NaiveDate,
) -> anyhow::Result<()> {
    let records = api.workouts(date, date).await?;
    if records.is_empty() {
        // An empty response means "no new data", not "clear the day";
        // whatever is already stored stays.
        info!(%date, "no workouts returned");
        return Ok(());
    }

    let day = date.to_string();
    let workouts: Vec<NewWorkout> = records
        .iter()
        .map(|w| NewWorkout {
            activity: format_activity_name(w.activity.as_deref()),
            calories: w.calories.unwrap_or(0.0),
            duration: workout_duration_secs(w),
            distance: w.distance.unwrap_or(0.0),
            start_time: w.start_datetime.clone(),
        })
        .collect();

    repo::replace_workouts(db, &day, &workouts).await?;
    info!(%date, count = workouts.len(), "workouts synced");
    Ok(())
}

/// Provider-supplied duration when present, otherwise end minus start
/// rounded to the nearest second. Unparseable or absent timestamps yield 0.
fn workout_duration_secs(w: &WorkoutRecord) -> i64 {
    if let Some(d) = w.duration {
        if d > 0 {
            return d;
        }
    }
    let (Some(start), Some(end)) = (w.start_datetime.as_deref(), w.end_datetime.as_deref()) else {
        return 0;
    };
    match (
        DateTime::parse_from_rfc3339(start),
        DateTime::parse_from_rfc3339(end),
    ) {
        (Ok(s), Ok(e)) => {
            let ms = (e - s).num_milliseconds();
            (ms as f64 / 1000.0).round() as i64
        }
        _ => 0,
    }
}

/// Turns the provider's concatenated-capitalized identifiers into readable
/// labels: "HighIntensityIntervalTraining" -> "High Intensity Interval
/// Training". Missing or empty names become "Workout".
fn format_activity_name(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return "Workout".to_string();
    };
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        if c.is_ascii_uppercase() && !out.is_empty() {
            out.push(' ');
        }
        out.push(c);
    }
    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Workout".to_string(),
    }
}
