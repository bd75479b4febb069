//! easy-preview: issue draft preview links from the terminal.

mod host;

use anyhow::Context;
use clap::{Parser, Subcommand};
use easy_preview_core::types::{EasyPreviewConfig, PreviewConfigFile, StoreConfig};
use easy_preview_core::{Navigator, PreviewAction, PreviewRequest, RedbDataset, SecretStore};
use host::{BrowserNavigator, PrintNavigator, StderrNotifier};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::SystemTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "easy-preview")]
#[command(about = "Issue draft preview links for studio documents", long_about = None)]
struct Args {
    /// Path to the preview config file.
    #[arg(long, env = "EASY_PREVIEW_CONFIG", default_value = "easy-preview.toml")]
    config: PathBuf,

    /// Directory holding the secret dataset.
    #[arg(long, env = "EASY_PREVIEW_DATA_DIR", default_value = ".easy-preview")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a preview secret for a document and open its URL.
    Open {
        /// Document type, as named in the config.
        #[arg(long = "type")]
        document_type: String,

        /// Published id of the document.
        #[arg(long)]
        id: String,

        /// JSON file with the draft version.
        #[arg(long)]
        draft: Option<PathBuf>,

        /// JSON file with the published version.
        #[arg(long)]
        published: Option<PathBuf>,

        /// Origin recorded on the secret.
        #[arg(long)]
        studio_origin: Option<String>,

        /// Print the URL instead of opening a browser.
        #[arg(long)]
        print: bool,
    },
    /// Delete expired preview secrets now.
    Cleanup,
    /// Report problems in the config file.
    Check,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let file = PreviewConfigFile::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    for warning in file.validate() {
        tracing::warn!(config = %args.config.display(), "{warning}");
    }

    match args.command {
        Command::Check => match EasyPreviewConfig::new(file.into_options()) {
            Ok(_) => Ok(ExitCode::SUCCESS),
            Err(err) => {
                tracing::error!(config = %args.config.display(), error = %err, "config is unusable");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Cleanup => {
            let store = open_store(&args.data_dir)?;
            let deleted = store.cleanup_expired(SystemTime::now())?;
            tracing::info!(deleted = deleted.len(), "expired preview secrets removed");
            Ok(ExitCode::SUCCESS)
        }
        Command::Open {
            document_type,
            id,
            draft,
            published,
            studio_origin,
            print,
        } => {
            let config = EasyPreviewConfig::new(file.into_options())?;
            let action = PreviewAction::new(config, open_store(&args.data_dir)?);

            let draft = draft.as_deref().map(read_document).transpose()?;
            let published = published.as_deref().map(read_document).transpose()?;

            let mut request = PreviewRequest::new(&id, &document_type);
            request.draft = draft.as_ref();
            request.published = published.as_ref();
            request.studio_origin = studio_origin.as_deref();

            if !action.is_available(&request) {
                tracing::info!(document_type = %document_type, "preview is not offered for this document");
                return Ok(ExitCode::FAILURE);
            }

            let navigator: &dyn Navigator = if print {
                &PrintNavigator
            } else {
                &BrowserNavigator
            };

            let Some(issued) = action.run(&request, navigator, &StderrNotifier, SystemTime::now())
            else {
                return Ok(ExitCode::FAILURE);
            };

            // The sweep runs detached; wait for it so exiting does not cut it short.
            if let Some(handle) = issued.cleanup
                && handle.join().is_err()
            {
                tracing::warn!("preview secret cleanup panicked");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_store(data_dir: &Path) -> anyhow::Result<SecretStore> {
    let dataset = RedbDataset::open(&StoreConfig {
        base_path: data_dir.to_path_buf(),
    })
    .with_context(|| format!("failed to open dataset in {}", data_dir.display()))?;
    Ok(SecretStore::new(Arc::new(dataset)))
}

fn read_document(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}
