use std::sync::Arc;

use anyhow::Context;
use npc_surprise_shared::SessionStatus;
use tokio::sync::watch;

use crate::application::{Api, SessionEnd, StreamSession};
use crate::ports::outbound::EventSourcePort;
use crate::state::{EntityStore, Projection, ProjectionCache, Snapshot, StoreEvent};

/// Configuration types for the player runner.
pub mod config {
    use std::time::Duration;

    use thiserror::Error;
    use url::Url;

    use crate::state::UnassignPolicy;

    pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/";
    pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("invalid {var}: {message}")]
        Invalid { var: &'static str, message: String },
    }

    #[derive(Clone, Debug)]
    pub struct ClientConfig {
        /// Always ends with `/` so relative paths join beneath it.
        pub api_base_url: Url,
        pub request_timeout: Duration,
        /// Log in under this name before reading the session status.
        pub login_name: Option<String>,
        pub unassign_policy: UnassignPolicy,
    }

    impl ClientConfig {
        pub fn from_env() -> Result<Self, ConfigError> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
            let api_base_url = parse_base_url(
                &lookup("NPC_SURPRISE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            )?;

            let request_timeout = match lookup("NPC_SURPRISE_REQUEST_TIMEOUT_MS") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: "NPC_SURPRISE_REQUEST_TIMEOUT_MS",
                    message: e.to_string(),
                })?,
                None => DEFAULT_REQUEST_TIMEOUT_MS,
            };

            let login_name = lookup("NPC_SURPRISE_LOGIN")
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty());

            let unassign_policy = match lookup("NPC_SURPRISE_UNASSIGN_POLICY") {
                Some(raw) => raw.parse().map_err(|message| ConfigError::Invalid {
                    var: "NPC_SURPRISE_UNASSIGN_POLICY",
                    message,
                })?,
                None => UnassignPolicy::default(),
            };

            Ok(Self {
                api_base_url,
                request_timeout: Duration::from_millis(request_timeout),
                login_name,
                unassign_policy,
            })
        }

        pub fn stream_url(&self) -> Result<Url, url::ParseError> {
            self.api_base_url.join("stream")
        }
    }

    fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
        let mut raw = raw.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            var: "NPC_SURPRISE_API_URL",
            message: e.to_string(),
        })
    }

}

use config::ClientConfig;

pub struct RunnerDeps {
    pub api: Api,
    pub events: Arc<dyn EventSourcePort>,
    pub store: EntityStore,
    pub config: ClientConfig,
}

/// Establishes the session identity, then mirrors the event stream into the
/// store and prints the projection after every change.
pub async fn run(deps: RunnerDeps) -> anyhow::Result<()> {
    let RunnerDeps {
        api,
        events,
        store,
        config,
    } = deps;

    let status = establish_session(&api, config.login_name.as_deref()).await?;
    if !status.is_logged_in() {
        tracing::warn!("No session; set NPC_SURPRISE_LOGIN to log in as a player");
    }
    tracing::info!(
        is_admin = status.is_admin,
        player = status.player_name.as_deref().unwrap_or("-"),
        "Session established"
    );
    store.apply(StoreEvent::StatusChanged(Some(status)));

    let mut updates = store.subscribe();
    let mut session = StreamSession::new(store.clone(), events).start();
    let mut cache = ProjectionCache::default();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, closing event stream");
                session.cancel();
                session.finished().await;
                return Ok(());
            }
            end = session.finished() => {
                render_pending(&mut updates, &mut cache);
                return match end {
                    Some(SessionEnd::TransportError(e)) => {
                        Err(e).context("event stream ended")
                    }
                    Some(SessionEnd::Cancelled) | None => Ok(()),
                };
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snapshot = updates.borrow_and_update().clone();
                render(&snapshot, &mut cache);
            }
        }
    }
}

async fn establish_session(api: &Api, login: Option<&str>) -> anyhow::Result<SessionStatus> {
    if let Some(name) = login {
        api.login(name)
            .await
            .with_context(|| format!("logging in as {name}"))?;
    }
    api.status().await.context("reading session status")
}

/// Prints the latest snapshot if it was not rendered yet.
fn render_pending(updates: &mut watch::Receiver<Arc<Snapshot>>, cache: &mut ProjectionCache) -> bool {
    if !updates.has_changed().unwrap_or(true) {
        return false;
    }
    let snapshot = updates.borrow_and_update().clone();
    render(&snapshot, cache);
    true
}

fn render(snapshot: &Snapshot, cache: &mut ProjectionCache) {
    if !snapshot.is_loaded() {
        return;
    }
    let projection = Projection::new(snapshot);
    let online: Vec<&str> = projection
        .online_players()
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();

    println!("--- revision {} ({:?}) ---", snapshot.revision(), projection.viewer());
    if projection.is_admin() {
        println!("online: {}", online.join(", "));
    }
    for view in cache.character_views(snapshot).iter() {
        print!("{view}");
    }
}
