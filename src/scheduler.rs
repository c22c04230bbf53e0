use time::OffsetDateTime;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::menus::services::MenuCatalog;

/// Registers the retention sweep that drops menus dated before the day it runs.
pub async fn scheduler(
    catalog: MenuCatalog,
    cron: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    sched
        .add(Job::new_async(cron, move |uuid, mut l| {
            let catalog = catalog.clone();

            Box::pin(async move {
                let today = OffsetDateTime::now_utc().date();
                if let Err(err) = catalog.purge_expired(today).await {
                    tracing::error!(err = %err, "failed to purge expired menus");
                }

                match l.next_tick_for_job(uuid).await {
                    Ok(next) => tracing::info!(next = ?next, "next menu purge scheduled"),
                    Err(err) => {
                        tracing::error!(err = %err, "failed to get next tick for menu purge")
                    }
                }
            })
        })?)
        .await?;

    Ok(sched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PURGE_CRON;

    #[test]
    fn purge_cron_expression_parses() {
        assert!(Job::new_async(DEFAULT_PURGE_CRON, |_, _| Box::pin(async {})).is_ok());
        assert!(Job::new_async("not a cron", |_, _| Box::pin(async {})).is_err());
    }
}
