use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::OuraConfig;

#[derive(Debug, thiserror::Error)]
pub enum OuraError {
    #[error("OURA_TOKEN is not configured")]
    MissingToken,
    #[error("Oura API error: {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to reach Oura API: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyScore {
    pub day: String,
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyActivity {
    pub day: String,
    pub score: Option<i64>,
    pub steps: Option<i64>,
    pub active_calories: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutRecord {
    pub activity: Option<String>,
    pub calories: Option<f64>,
    pub duration: Option<i64>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    pub distance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Collection<T> {
    data: Vec<T>,
}

/// The slice of the ring vendor's v2 API the sync engine consumes. Faked in
/// tests, implemented over HTTP by [`OuraClient`].
#[async_trait]
pub trait OuraApi: Send + Sync {
    async fn daily_readiness(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyScore>, OuraError>;

    async fn daily_sleep(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyScore>, OuraError>;

    async fn daily_activity(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyActivity>, OuraError>;

    async fn workouts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutRecord>, OuraError>;
}

pub struct OuraClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl OuraClient {
    pub fn new(config: &OuraConfig) -> Result<Self, OuraError> {
        let token = config.token.clone().ok_or(OuraError::MissingToken)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("vitalog/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn collection<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<T>, OuraError> {
        let url = format!("{}/v2/usercollection/{}", self.base_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(OuraError::Status(resp.status()));
        }
        let body: Collection<T> = resp.json().await?;
        Ok(body.data)
    }
}

#[async_trait]
impl OuraApi for OuraClient {
    async fn daily_readiness(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyScore>, OuraError> {
        self.collection("daily_readiness", start, end).await
    }

    async fn daily_sleep(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyScore>, OuraError> {
        self.collection("daily_sleep", start, end).await
    }

    async fn daily_activity(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyActivity>, OuraError> {
        self.collection("daily_activity", start, end).await
    }

    async fn workouts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutRecord>, OuraError> {
        self.collection("workout", start, end).await
    }
}
