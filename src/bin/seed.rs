//! Creates a user with the sample events and a number of random events.
//!
//! Usage: `seed <name> <email> [timezone] [random events]`
//!
//! Without `DATABASE_URL` the events only live as long as the process.

use agenda::telemetry::{get_subscriber, init_subscriber};
use agenda_domain::User;
use agenda_infra::{seed::seed_sample_events, setup_context};
use chrono_tz::Tz;
use tracing::info;

const DEFAULT_RANDOM_EVENTS: usize = 20;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("agenda_seed".into(), "info".into());
    init_subscriber(subscriber);

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let (name, email) = match (args.get(0), args.get(1)) {
        (Some(name), Some(email)) => (name.clone(), email.clone()),
        _ => anyhow::bail!("Usage: seed <name> <email> [timezone] [random events]"),
    };
    let timezone = match args.get(2) {
        Some(tz) => Some(
            tz.parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("Invalid timezone: {}. {}", tz, e))?,
        ),
        None => None,
    };
    let random_count = match args.get(3) {
        Some(count) => count.parse::<usize>()?,
        None => DEFAULT_RANDOM_EVENTS,
    };

    let context = setup_context().await?;
    let user = User::new(name, email, timezone, context.sys.get_timestamp_millis());
    context.repos.users.insert(&user).await?;
    let events = seed_sample_events(&context, &user, random_count).await?;

    info!("Created user: {} with {} events", user.id, events.len());
    println!("{}", user.id);
    Ok(())
}
