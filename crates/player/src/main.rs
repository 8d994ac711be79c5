//! NPC Surprise player - command-line client binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use npc_surprise_player::application::Api;
use npc_surprise_player::infrastructure::create_transport;
use npc_surprise_player::runner::{config::ClientConfig, run, RunnerDeps};
use npc_surprise_player::state::{EntityStore, Reducer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npc_surprise_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting NPC Surprise player");

    let config = ClientConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, "Using API");

    // HTTP + event stream share one cookie jar
    let transport = create_transport(&config)?;
    let api = Api::new(Arc::new(transport.api));
    let events = Arc::new(transport.events);

    let store = EntityStore::new(Reducer::new(config.unassign_policy));

    run(RunnerDeps {
        api,
        events,
        store,
        config,
    })
    .await
}
