//! Real-time room coordination server.
//!
//! Coordinates gameplay rooms: chat and presence, votes, meme updates and a
//! shared countdown, fanned out to every connected participant.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin royale-server
//! cargo run --bin royale-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin royale-server -- --redis-url redis://127.0.0.1/
//! ```

use std::sync::Arc;

use clap::Parser;
use royale_server::{
    domain::{AuthPolicy, Backplane, KeyValueStore, Username},
    infrastructure::{
        backplane::{InProcessBackplane, RedisBackplane},
        identity::StaticTokenIdentity,
        registry::GroupRegistry,
        store::{InMemoryStore, RedisStore},
    },
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, RelayMemeUseCase, RelayVoteUseCase,
        SendChatUseCase, StartCountdownUseCase,
    },
};
use royale_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "royale-server")]
#[command(about = "Real-time room coordination server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Redis URL backing the cross-process backplane and the shared state
    /// store. Without it the server runs single-node, fully in process.
    #[arg(long)]
    redis_url: Option<String>,

    /// Credential accepted on the main sub-channel, as `token=display_name`.
    /// May be repeated.
    #[arg(long = "auth-token", value_name = "TOKEN=NAME")]
    auth_tokens: Vec<String>,

    /// Reject unidentified callers on the main sub-channel instead of
    /// admitting them as "Anonymous"
    #[arg(long)]
    require_auth: bool,
}

fn parse_auth_tokens(pairs: &[String]) -> Result<StaticTokenIdentity, String> {
    let mut provider = StaticTokenIdentity::new();
    for pair in pairs {
        let (token, name) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected TOKEN=NAME, got '{}'", pair))?;
        let username =
            Username::new(name.to_string()).map_err(|e| format!("bad name in '{}': {}", pair, e))?;
        provider = provider.with_token(token, username);
    }
    Ok(provider)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Backplane + shared state store
    // 2. Group registry
    // 3. Identity provider
    // 4. UseCases
    // 5. Server

    // 1. Backplane and store: Redis when configured, in-process otherwise
    let (backplane, store): (Arc<dyn Backplane>, Arc<dyn KeyValueStore>) = match &args.redis_url {
        Some(url) => {
            let backplane = match RedisBackplane::connect(url) {
                Ok(backplane) => backplane,
                Err(e) => {
                    tracing::error!("Failed to open Redis backplane at '{}': {}", url, e);
                    std::process::exit(1);
                }
            };
            let store = match RedisStore::connect(url) {
                Ok(store) => store,
                Err(e) => {
                    tracing::error!("Failed to open Redis store at '{}': {}", url, e);
                    std::process::exit(1);
                }
            };
            tracing::info!("Using Redis backplane and store at '{}'", url);
            (Arc::new(backplane), Arc::new(store))
        }
        None => {
            tracing::info!("No Redis URL configured; running single-node in process");
            (
                Arc::new(InProcessBackplane::new()),
                Arc::new(InMemoryStore::new()),
            )
        }
    };

    // 2. Group registry over the backplane
    let registry = Arc::new(GroupRegistry::new(backplane));

    // 3. Identity provider and policy
    let identity_provider = match parse_auth_tokens(&args.auth_tokens) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            tracing::error!("Invalid --auth-token: {}", e);
            std::process::exit(1);
        }
    };
    let auth_policy = if args.require_auth {
        AuthPolicy::Required
    } else {
        AuthPolicy::AllowAnonymous
    };

    // 4. UseCases
    let clock = Arc::new(SystemClock);
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
        registry.clone(),
        identity_provider,
        auth_policy,
    ));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(registry.clone()));
    let send_chat_usecase = Arc::new(SendChatUseCase::new(registry.clone(), clock));
    let start_countdown_usecase =
        Arc::new(StartCountdownUseCase::new(registry.clone(), store.clone()));
    let relay_vote_usecase = Arc::new(RelayVoteUseCase::new(registry.clone()));
    let relay_meme_usecase = Arc::new(RelayMemeUseCase::new(registry.clone()));

    // 5. Create and run the server
    let server = Server::new(
        connect_session_usecase,
        disconnect_session_usecase,
        send_chat_usecase,
        start_countdown_usecase,
        relay_vote_usecase,
        relay_meme_usecase,
        store,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
