//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (FEE_SWEEP_SCHEDULE, hourly by default)
//!     │
//!     └─► sweep_overdue_fees(today)
//!             └─► pending fees with due_date < today → overdue
//! ```

use anyhow::Result;
use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::fees::actions::sweep_overdue_fees;
use crate::kernel::ServerDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: ServerDeps, fee_sweep_schedule: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sweep_job = Job::new_async(fee_sweep_schedule, move |_uuid, _lock| {
        let deps = deps.clone();
        Box::pin(async move {
            if let Err(e) = run_fee_sweep(&deps).await {
                tracing::error!("Overdue fee sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!(schedule = %fee_sweep_schedule, "Scheduled tasks started (overdue fee sweep)");
    Ok(scheduler)
}

async fn run_fee_sweep(deps: &ServerDeps) -> Result<()> {
    tracing::debug!("Running overdue fee sweep");

    let today = Utc::now().date_naive();
    let updated = sweep_overdue_fees(today, deps).await?;

    tracing::debug!(updated, "Overdue fee sweep complete");
    Ok(())
}
