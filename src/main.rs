use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use iocraft::prelude::*;

use issuemyst::app::App;
use issuemyst::backend::{BackendClient, Engine, HttpEngine};
use issuemyst::color::ColorDepth;
use issuemyst::config::loader;
use issuemyst::render::plain_lines;
use issuemyst::state::UiState;
use issuemyst::theme::{Background, ResolvedTheme};

#[derive(Parser)]
#[command(
    name = "issuemyst",
    version,
    about = "Pick a random open issue from a GitHub repository"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend origin, overrides `server.url` from the config.
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Repository to submit right away (`owner/repo` or a GitHub URL).
    #[arg(value_name = "REPO")]
    repo: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one random open issue and exit.
    Pick {
        /// `owner/repo` or a GitHub URL.
        repo: String,
    },
}

fn main() -> Result<()> {
    // Install a panic hook that writes to a file, since the fullscreen TUI
    // swallows stderr.
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("{info}\n\n{backtrace}");
        let _ = std::fs::write("panic.log", &msg);
        eprintln!("{msg}");
    }));

    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let mut config = loader::load_config(cli.config.as_deref())?;
    if let Some(server) = cli.server.as_deref() {
        config.server.url = loader::normalize_server_url(server);
    }

    let client = BackendClient::new(&config.server)?;
    let server_label = client.endpoint().to_owned();
    // Dropping `engine_handle` at the end of `main` closes the request
    // channel and stops the engine thread.
    let engine_handle = HttpEngine::new(client).start();

    tracing::info!("issuemyst starting, backend {server_label}");

    if let Some(Commands::Pick { repo }) = cli.command {
        return match issuemyst::pick::pick(&engine_handle, &repo) {
            UiState::Showing(issue) => {
                for line in plain_lines(&issue) {
                    println!("{line}");
                }
                Ok(())
            }
            UiState::Error(message) => Err(anyhow::anyhow!(message)),
            other => Err(anyhow::anyhow!("unexpected final state: {other:?}")),
        };
    }

    let theme = ResolvedTheme::resolve(&config.theme, Background::detect(), ColorDepth::detect());

    let submit_on_start = cli.repo.is_some();
    let initial_input = cli.repo.or_else(|| {
        let cwd = std::env::current_dir().ok()?;
        issuemyst::git::detect_repo(&cwd).map(|r| r.to_string())
    });

    // Enter fullscreen TUI (iocraft uses smol internally).
    smol::block_on(
        element! {
            App(
                engine: &engine_handle,
                theme: &theme,
                initial_input,
                submit_on_start,
                server_label,
            )
        }
        .fullscreen(),
    )?;

    Ok(())
}
