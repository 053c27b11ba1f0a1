//! CyberStream - terminal-style command bot
//!
//! Reads commands from stdin, dispatches them one at a time and prints the
//! normalized results.

use anyhow::Result;
use clap::Parser;
use cyberstream::config::Config;
use cyberstream::core::gemini::GeminiClient;
use cyberstream::http::ReqwestFetcher;
use cyberstream::processor::Processor;
use cyberstream::render::{self, Typewriter, BANNER};
use cyberstream::response::{HandlerResult, Payload};
use cyberstream::services::Services;
use cyberstream::session::SessionStore;
use cyberstream::terminal::{logged_out_input, Terminal};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the startup animation
    #[arg(long)]
    no_banner: bool,
}

fn log_level(config: &Config, verbose: bool) -> Level {
    if verbose {
        return Level::DEBUG;
    }
    config.log_level.parse().unwrap_or(Level::INFO)
}

async fn play_banner(speed_ms: u64) {
    for frame in Typewriter::new(BANNER) {
        print!("\r{frame}");
        let _ = std::io::stdout().flush();
        tokio::time::sleep(Duration::from_millis(speed_ms)).await;
    }
    println!();
}

async fn print_prompt(terminal: &Terminal) {
    let state = terminal.state().await;
    let text = if state.identity.is_none() {
        "Enter your username to access the terminal: "
            .color(render::accent(state.theme))
            .to_string()
    } else {
        let clock = state
            .clock_visible
            .then(|| chrono::Local::now().format("%H:%M:%S").to_string());
        render::prompt(state.username(), clock.as_deref(), state.theme)
    };
    print!("{text}");
    let _ = std::io::stdout().flush();
}

/// Run one line through the terminal, printing progress as it arrives
async fn run_line(terminal: &Terminal, line: &str) -> Option<HandlerResult> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let printer = async {
        while let Some(message) = rx.recv().await {
            println!("{}", message.dimmed());
        }
    };
    let work = async move {
        let result = terminal.submit(line, Some(&tx)).await;
        drop(tx);
        result
    };
    let (result, ()) = tokio::join!(work, printer);
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging (stderr keeps the transcript readable)
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&config, args.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("📡 CyberStream v{} starting...", env!("CARGO_PKG_VERSION"));

    let fetch = Arc::new(ReqwestFetcher::new()?);
    let generator = Arc::new(GeminiClient::new(fetch.clone(), &config.endpoints));
    let services = Services::new(fetch, config.endpoints.clone(), generator);
    let terminal = Terminal::new(Processor::new(services), SessionStore::default_location());

    if config.show_banner && !args.no_banner {
        play_banner(config.typing_speed_ms).await;
    }
    let theme = terminal.theme().await;
    for line in render::welcome_lines(theme) {
        println!("{line}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&terminal).await;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let input = if terminal.is_logged_in().await {
            line.to_string()
        } else {
            logged_out_input(line)
        };

        let Some(result) = run_line(&terminal, &input).await else {
            continue;
        };
        if let Some(Payload::Clear) = result.payload() {
            print!("\x1B[2J\x1B[H");
            let _ = std::io::stdout().flush();
            continue;
        }
        let theme = terminal.theme().await;
        for out in render::render(&result, theme) {
            println!("{out}");
        }
    }

    info!("👋 CyberStream shutting down");
    Ok(())
}
