mod capture;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hearth_core::{CaptureSession, HttpBackend};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::capture::RecipeArgs;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Hearth household organizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the space new recipes will be saved to
    Spaces,
    /// Capture a recipe, optionally extracting it from text or a photo first
    AddRecipe {
        #[command(flatten)]
        recipe: RecipeArgs,
        /// Extract from recipe text in this file ("-" reads stdin)
        #[arg(long)]
        from_text: Option<PathBuf>,
        /// Extract from a photo of the recipe
        #[arg(long)]
        from_image: Option<PathBuf>,
        /// Print the payload instead of saving it
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let backend = Arc::new(HttpBackend::from_env().context("Invalid backend configuration")?);
    let mut session = CaptureSession::new(backend);

    // Ctrl-C dismisses the session so in-flight requests are abandoned cleanly.
    let token = session.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, dismissing session");
            token.cancel();
        }
    });

    match cli.command {
        Commands::Spaces => spaces(&mut session).await,
        Commands::AddRecipe {
            recipe,
            from_text,
            from_image,
            dry_run,
        } => {
            let sources = capture::Sources {
                text: from_text,
                image: from_image,
            };
            capture::add_recipe(&mut session, &recipe, &sources, dry_run).await
        }
    }
}

async fn spaces(session: &mut CaptureSession) -> Result<()> {
    match session.mount().await.space_id() {
        Some(id) => {
            println!("{}", id);
            Ok(())
        }
        None => anyhow::bail!("No space available; check HEARTH_API_URL and HEARTH_API_TOKEN"),
    }
}
