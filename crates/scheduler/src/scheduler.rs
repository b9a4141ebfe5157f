use anyhow::Result;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

pub struct DailyScheduler {
    scheduler: JobScheduler,
}

impl DailyScheduler {
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self { scheduler })
    }

    /// Registers `job_fn` to run every day at `hour:minute` UTC.
    pub async fn add_daily_job<F, Fut>(&mut self, hour: u32, minute: u32, job_fn: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        let cron_expression = daily_cron(hour, minute)?;
        info!("Scheduling daily job with cron: {}", cron_expression);

        let job_fn = Arc::new(job_fn);
        let job = Job::new_async(cron_expression.as_str(), move |_uuid, _l| {
            let job_fn = job_fn.clone();
            Box::pin(async move {
                info!("Executing scheduled job at {}", OffsetDateTime::now_utc());
                match job_fn().await {
                    Ok(()) => info!("Scheduled job completed successfully"),
                    Err(e) => error!("Scheduled job failed: {:#}", e),
                }
            })
        })?;

        self.scheduler.add(job).await?;
        Ok(())
    }

    pub async fn start(&self) -> Result<()> {
        info!("Starting scheduler...");
        self.scheduler.start().await?;
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down scheduler...");
        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;
        Ok(())
    }
}

/// Six-field cron expression (seconds first) for a daily run.
pub fn daily_cron(hour: u32, minute: u32) -> Result<String> {
    if hour > 23 || minute > 59 {
        anyhow::bail!("invalid schedule time {:02}:{:02}", hour, minute);
    }
    Ok(format!("0 {} {} * * *", minute, hour))
}
