//! ReviewLens: review authenticity and relevance analysis server.

use std::path::PathBuf;
use std::sync::Arc;

use reviewlens_core::PipelineConfig;
use reviewlens_judge::JudgeConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod routes;
mod state;

use state::AppState;

const DEFAULT_PORT: u16 = 3005;

fn resolve_port() -> anyhow::Result<u16> {
    match std::env::var("REVIEWLENS_PORT") {
        Ok(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("REVIEWLENS_PORT must be a port number, got '{}'", v)),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn load_judge_config() -> JudgeConfig {
    match std::env::var("REVIEWLENS_JUDGE_CONFIG") {
        Ok(path) => JudgeConfig::load(&PathBuf::from(path)),
        Err(_) => JudgeConfig::from_env(),
    }
}

fn print_help() {
    println!("ReviewLens: review authenticity and relevance analysis");
    println!();
    println!("Usage: reviewlens [command]");
    println!();
    println!("Commands:");
    println!("  (none)                         Start the server");
    println!("  analyze <reviews.json> <cat>   Analyze a review file and print JSON");
    println!("  categories                     List configured categories");
    println!("  help                           Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `analyze` output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if matches!(args.get(1).map(String::as_str), Some("--help" | "-h" | "help")) {
        print_help();
        return Ok(());
    }

    let config = PipelineConfig::from_env()?;
    let judge_config = load_judge_config();
    let state = Arc::new(AppState::new(config, judge_config)?);

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "analyze" => {
                if args.len() < 4 {
                    eprintln!("Usage: reviewlens analyze <reviews.json> <category>");
                    std::process::exit(1);
                }
                cli::analyze(&state.orchestrator, &PathBuf::from(&args[2]), &args[3]).await?;
                return Ok(());
            }
            "categories" => {
                cli::print_categories(&state.orchestrator);
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'reviewlens help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let port = resolve_port()?;
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ReviewLens server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
