use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memory_bank::config::{Config, EXTENSION_ENV, ROOT_ENV};
use memory_bank::store::DocumentStore;
use memory_bank::{api, mcp};

#[derive(Parser)]
#[command(name = "mbank")]
#[command(about = "Persistent markdown memory bank for AI-assisted development")]
struct Cli {
    /// Memory bank directory (defaults to ./memory-bank)
    #[arg(long, global = true, env = ROOT_ENV)]
    root: Option<PathBuf>,

    /// Extension of documents included in listings
    #[arg(long, global = true, env = EXTENSION_ENV)]
    extension: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server via stdio (default)
    Mcp,
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Create the memory bank and its bootstrap documents if missing
    Init,
}

/// Initialize tracing with output to stderr (for MCP mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "memory_bank=info,tower_http=info".into()),
    );

    if use_stderr {
        // MCP mode: log to stderr so stdout is clean for protocol
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, None | Some(Commands::Mcp));
    init_tracing(use_stderr);

    let config = Config::resolve(cli.root, cli.extension)?;
    let store = DocumentStore::from_config(&config);

    match cli.command {
        None | Some(Commands::Mcp) => {
            mcp::run_stdio_server(store).await?;
        }
        Some(Commands::Serve { port }) => {
            tracing::info!(
                "Serving memory bank at {} on port {}",
                store.root().display(),
                port
            );

            let app = api::create_router(store);

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("Memory bank listening on http://127.0.0.1:{}", port);

            axum::serve(listener, app).await?;
        }
        Some(Commands::Init) => {
            store.ensure_initialized()?;
            println!("Memory bank ready at {}", store.root().display());
            for name in store.list_documents()? {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}
