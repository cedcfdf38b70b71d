use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, Local};
use sqlx::SqlitePool;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

use crate::oura::client::OuraApi;
use crate::oura::sync;

/// Sync runs at 10:00, 22:00 and 23:55 local time. The late-evening run
/// catches the provider finalizing the day; the morning run picks up
/// records that arrive overnight.
const SYNC_SCHEDULES: [&str; 3] = ["0 0 10 * * *", "0 0 22 * * *", "0 55 23 * * *"];

/// Registers the daily sync jobs and starts the scheduler. Each job targets
/// "yesterday" (provider data for the current day is not final until the
/// next day), awaits the sync run, and relies on the run's own error
/// boundaries; a failed run never affects the next one.
pub async fn start(db: SqlitePool, api: Arc<dyn OuraApi>) -> anyhow::Result<JobScheduler> {
    let sched = JobScheduler::new().await.context("creating scheduler")?;

    for expr in SYNC_SCHEDULES {
        let db = db.clone();
        let api = api.clone();
        let job = Job::new_async_tz(expr, Local, move |_id, _sched| {
            let db = db.clone();
            let api = api.clone();
            Box::pin(async move {
                let date = Local::now().date_naive() - Days::new(1);
                sync::run(&db, api.as_ref(), date).await;
            })
        })
        .with_context(|| format!("creating sync job for schedule {expr}"))?;
        sched.add(job).await.context("adding sync job")?;
    }

    sched.start().await.context("starting scheduler")?;
    info!("scheduled Oura sync at 10:00, 22:00 and 23:55 daily");
    Ok(sched)
}
