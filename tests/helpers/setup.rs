use agenda_api::Application;
use agenda_infra::{AgendaContext, Config, InMemoryReminderNotifier};
use agenda_sdk::AgendaSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    /// Shares the stores of the running application
    pub ctx: AgendaContext,
    pub notifier: Arc<InMemoryReminderNotifier>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, AgendaSDK, String) {
    let mut ctx = AgendaContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.send_reminders_job = false;
    let notifier = Arc::new(InMemoryReminderNotifier::new());
    ctx.notifier = notifier.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        ctx,
        notifier,
    };
    let sdk = AgendaSDK::new(address.clone());
    (app, sdk, address)
}
