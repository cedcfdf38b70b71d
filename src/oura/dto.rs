use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SaveScoresRequest {
    pub readiness_score: Option<i64>,
    pub sleep_score: Option<i64>,
    pub activity_score: Option<i64>,
    pub steps: Option<i64>,
}

/// One workout as posted to the API. Unlike the provider records handled by
/// the sync engine, these carry a ready-made `start_time` and label.
#[derive(Debug, Deserialize)]
pub struct WorkoutPayload {
    pub activity: Option<String>,
    pub start_time: Option<String>,
    pub calories: Option<f64>,
    pub distance: Option<f64>,
    pub duration: Option<i64>,
}
