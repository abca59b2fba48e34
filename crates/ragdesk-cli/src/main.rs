use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ragdesk_application::{AutoConfirm, Confirmation, RagdeskApp};
use ragdesk_core::state::Page;
use ragdesk_infrastructure::ClientConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod prompt;

use commands::{chat, files, index, methods, page, sessions, settings};

#[derive(Parser)]
#[command(name = "ragdesk")]
#[command(about = "RagDesk - manage documents, indexes and chat sessions of a RAG service", long_about = None)]
struct Cli {
    /// Backend URL (overrides config and RAGDESK_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Uploaded documents
    Files {
        #[command(subcommand)]
        action: files::FilesAction,
    },
    /// Document indexes
    Index {
        #[command(subcommand)]
        action: index::IndexAction,
    },
    /// Send one chat turn
    Chat(chat::ChatArgs),
    /// Chat sessions
    Sessions {
        #[command(subcommand)]
        action: sessions::SessionsAction,
    },
    /// Retrieval methods
    Methods {
        #[command(subcommand)]
        action: methods::MethodsAction,
    },
    /// Open a page: chat, files, rag-methods or settings
    Page { page: Page },
    /// Persisted user settings
    Settings {
        #[command(subcommand)]
        action: settings::SettingsAction,
    },
}

fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter.as_deref().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load().context("Failed to load client configuration")?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
        config.validate()?;
    }
    init_tracing(&config);
    tracing::debug!("[ragdesk] Backend: {}", config.base_url);

    // Methods listing needs no backend or storage.
    if let Commands::Methods { action } = &cli.command {
        return methods::run(action);
    }

    let confirmation: Arc<dyn Confirmation> = if cli.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(prompt::StdinConfirmation)
    };
    let app = RagdeskApp::from_config(&config, confirmation).await?;

    let result = match cli.command {
        Commands::Files { action } => files::run(&app, action).await,
        Commands::Index { action } => index::run(&app, action).await,
        Commands::Chat(args) => chat::run(&app, args).await,
        Commands::Sessions { action } => sessions::run(&app, action).await,
        Commands::Page { page: target } => page::run(&app, target).await,
        Commands::Settings { action } => settings::run(&app, action).await,
        Commands::Methods { .. } => Ok(()),
    };

    for notice in app.notices.drain() {
        eprintln!("[{}] {}", notice.level, notice.text);
    }
    result
}
