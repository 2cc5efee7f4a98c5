mod config;
mod repos;
pub mod seed;
mod services;
mod system;

pub use config::Config;
pub use repos::{DeleteResult, IEventRepo, IUserRepo, Repos};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct AgendaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn IReminderNotifier>,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl AgendaContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos = match params.postgres_connection_string {
            Some(connection_string) => {
                run_migration(&connection_string).await?;
                Repos::create_postgres(&connection_string).await?
            }
            None => {
                info!("Did not find DATABASE_URL environment variable. Events are going to be stored in memory.");
                Repos::create_inmemory()
            }
        };
        let notifier: Arc<dyn IReminderNotifier> = match &config.reminder_webhook_url {
            Some(url) => Arc::new(WebhookReminderNotifier::new(
                url.clone(),
                config.reminder_webhook_key.clone(),
            )),
            None => Arc::new(LogReminderNotifier {}),
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        })
    }

    /// Context backed by in memory repositories and a recording notifier
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(InMemoryReminderNotifier::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<AgendaContext> {
    AgendaContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}

pub async fn run_migration(connection_string: &str) -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
