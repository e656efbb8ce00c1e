//! matchmaker server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the JSON API over HTTP.
//!
//! # Registering actors
//!
//! Account sign-up happens out of band. To create an actor and print an API
//! token for it:
//!
//! ```
//! cargo run -p matchmaker-server -- --register carla --role catalyst
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use matchmaker_api::{AppState, auth};
use matchmaker_core::{
  actor::{NewActor, Role},
  store::MatchStore,
};
use matchmaker_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Seeker/catalyst matchmaking server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Create an actor with this username, print its token, and exit.
  #[arg(long, value_name = "USERNAME", requires = "role")]
  register: Option<String>,

  /// Role of the actor created by `--register` (seeker or catalyst).
  #[arg(long)]
  role: Option<Role>,

  /// Display name of the actor created by `--register`.
  #[arg(long)]
  name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path = server_cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: register an actor and exit.
  if let (Some(username), Some(role)) = (cli.register, cli.role) {
    let input = NewActor {
      display_name: cli.name.unwrap_or_default(),
      ..NewActor::new(username, role)
    };
    let actor = store.add_actor(input).await.context("failed to register actor")?;
    let token = auth::issue_token(&store, actor.actor_id)
      .await
      .context("failed to issue token")?;
    tracing::info!(actor_id = %actor.actor_id, role = %actor.role, "actor registered");
    println!("{token}");
    return Ok(());
  }

  let state = AppState::new(Arc::new(store), server_cfg.token_ttl());
  let app = matchmaker_api::router(state).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
