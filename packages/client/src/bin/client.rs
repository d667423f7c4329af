//! CLI lobby client for the Anzen safety-training game.
//!
//! Connects to the lobby server, mirrors room state and issues intents
//! from slash commands on stdin. Automatically reconnects on
//! disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin anzen-client -- --username Alice
//! cargo run --bin anzen-client -- -u Bob --skin worker-blue
//! ```

use clap::Parser;

use anzen_client::{runner::run_client, session::SessionConfig};
use anzen_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "anzen-client")]
#[command(about = "CLI lobby client for the Anzen safety-training game", long_about = None)]
struct Args {
    /// Display name shown to other players
    #[arg(short = 'u', long)]
    username: String,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Cosmetic skin id
    #[arg(long, default_value = "default")]
    skin: String,

    /// Cosmetic title shown next to the name
    #[arg(long)]
    title_name: Option<String>,

    /// Custom character reference
    #[arg(long)]
    custom_character: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = SessionConfig {
        url: args.url,
        username: args.username,
        skin: args.skin,
        title_name: args.title_name,
        custom_character: args.custom_character,
    };

    // Run the client
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
