pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::navigation::{SessionEvent, SessionEvents};
use crate::session::{FileTokenStore, TokenStore};

#[derive(Parser)]
#[command(name = "crm")]
#[command(about = "Education CRM - command-line client for the CRM API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, registration and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(flatten)]
    Data(commands::data::DataCommands),

    #[command(about = "Send a raw request through the authenticated client")]
    Api(commands::api::ApiArgs),

    #[command(about = "Show what the route guard decides for a dashboard path")]
    Route {
        #[arg(help = "Dashboard path, e.g. /students/42")]
        path: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Session-scoped services shared by every command
pub struct Context {
    pub config: ClientConfig,
    pub store: Arc<dyn TokenStore>,
    pub events: SessionEvents,
    pub client: ApiClient,
}

impl Context {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let events = SessionEvents::new();
        let client = ApiClient::new(&config, store.clone(), events.clone());
        Self {
            config,
            store,
            events,
            client,
        }
    }

    /// Context backed by the session file in the configured directory
    pub fn from_config(config: ClientConfig) -> Self {
        let store = Arc::new(FileTokenStore::new(config.session_file()));
        Self::new(config, store)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = Context::from_config(crate::config::config().clone());

    // Subscribed once, before any request can invalidate the session
    let mut invalidations = ctx.events.subscribe();

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx, output_format.clone()).await,
        Commands::Data(cmd) => commands::data::handle(cmd, &ctx, output_format.clone()).await,
        Commands::Api(args) => commands::api::handle(args, &ctx, output_format.clone()).await,
        Commands::Route { path } => commands::route::handle(&path, &ctx, output_format.clone()),
    };

    let result = match invalidations.try_recv() {
        Ok(SessionEvent::Invalidated { redirect_to }) => {
            tracing::info!("session reset, navigating to {}", redirect_to.path);
            drop(ctx);
            Err(anyhow::Error::new(ClientError::SessionExpired)
                .context("Run `crm auth login` to start a new session."))
        }
        Err(_) => result,
    };

    if let Err(e) = &result {
        if matches!(output_format, OutputFormat::Json) {
            utils::output_error(&output_format, &format!("{:#}", e), utils::error_code_of(e))?;
        }
    }

    result
}
