use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rivals::banner::{ServerBanner, client_banner, server_banner};
use rivals::chat::openrouter::OpenRouterChat;
use rivals::client::HttpApi;
use rivals::client::repl;
use rivals::client::view::ClientView;
use rivals::config::{Credentials, ServerSettings, parse_addr};
use rivals::consts::{
    DEFAULT_ENRICH_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT,
    DEFAULT_SERVER_URL, OPENROUTER_KEY_VAR, SERPER_KEY_VAR,
};
use rivals::discover::Discoverer;
use rivals::engine::fanout::{FanOutConfig, FanOutEngine};
use rivals::enrich::Enricher;
use rivals::search::serper::SerperSearch;
use rivals::server::{run_server, state::AppState};

#[derive(Parser)]
#[command(
    name = "rivals",
    version,
    about = "Find the competitors of a website.",
    after_help = "Requires OPENROUTER_API_KEY and SERPER_API_KEY in the environment to serve."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Address to listen on
    #[arg(long, env = "RIVALS_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Chat model used to discover competitors (OpenRouter model id)
    #[arg(short, long, env = "RIVALS_MODEL")]
    model: Option<String>,

    /// Seconds to wait for a single competitor's enrichment
    #[arg(long, default_value_t = DEFAULT_ENRICH_TIMEOUT_SECS)]
    enrich_timeout: u64,

    /// Seconds to wait for any single upstream HTTP request
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    http_timeout: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Look up competitors from the terminal against a running server
    Client {
        /// Base URL of the rivals server
        #[arg(short, long, env = "RIVALS_SERVER", default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Look up a single website and exit (non-interactive)
        #[arg(short, long)]
        website: Option<String>,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rivals=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Command::Client { ref server, ref website }) => {
            run_client(server, website.as_deref()).await
        }
        None => serve(&cli).await,
    }
}

/// Validate configuration before binding anything.
fn settings_from(cli: &Cli) -> anyhow::Result<ServerSettings> {
    let credentials = Credentials::from_env_values(
        std::env::var(OPENROUTER_KEY_VAR).ok(),
        std::env::var(SERPER_KEY_VAR).ok(),
    )?;
    Ok(ServerSettings {
        addr: parse_addr(&cli.host, cli.port)?,
        model: cli.model.clone(),
        enrich_timeout: Duration::from_secs(cli.enrich_timeout),
        http_timeout: Duration::from_secs(cli.http_timeout),
        credentials,
    })
}

async fn serve(cli: &Cli) -> anyhow::Result<()> {
    let settings = settings_from(cli).context("refusing to start")?;
    let credentials = settings.credentials;

    let chat = OpenRouterChat::new(
        credentials.openrouter_api_key,
        settings.model,
        settings.http_timeout,
    )?;
    let model = chat.model().to_string();
    let search = SerperSearch::new(credentials.serper_api_key, settings.http_timeout)?;

    let engine = FanOutEngine::new(
        Discoverer::new(Arc::new(chat)),
        Enricher::new(Arc::new(search)),
        FanOutConfig {
            enrich_timeout: settings.enrich_timeout,
        },
    );

    println!(
        "{}",
        server_banner(&ServerBanner {
            addr: settings.addr,
            model: &model,
            enrich_timeout: settings.enrich_timeout,
            http_timeout: settings.http_timeout,
        })
    );

    run_server(AppState::new(Arc::new(engine)), settings.addr).await
}

async fn run_client(server: &str, website: Option<&str>) -> anyhow::Result<()> {
    let api = HttpApi::new(server)?;

    // Single lookup mode
    if let Some(website) = website {
        let mut view = ClientView::new();
        repl::lookup(&mut view, &api, website).await;
        return Ok(());
    }

    println!("{}", client_banner(server));
    repl::run(&api).await
}
