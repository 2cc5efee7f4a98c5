//! Runs the reminder dispatcher once. Meant to be scheduled every minute by
//! an external scheduler when the server runs with `SEND_REMINDERS_JOB=false`.
//!
//! Exits with a non-zero code only when the store can not be reached. Failed
//! deliveries are logged and do not fail the run.

use agenda::telemetry::{get_subscriber, init_subscriber};
use agenda_api::{execute, SendEventRemindersUseCase};
use agenda_infra::setup_context;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("agenda_send_event_reminders".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await?;
    let summary = execute(SendEventRemindersUseCase {}, &context)
        .await
        .map_err(|e| anyhow::anyhow!("Unable to dispatch event reminders: {:?}", e))?;

    for failure in &summary.failed {
        error!(
            "Reminder for event: {} was not delivered: {}",
            failure.event_id, failure.message
        );
    }
    info!(
        "Sent {} event reminders. {} were already sent and {} failed.",
        summary.sent,
        summary.skipped,
        summary.failed.len()
    );
    Ok(())
}
