//! clientgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::pin::Pin;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use clientgen_core::{generate, openapi::remote_url, Config};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{Duration, Sleep};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Output directory used when neither a config file nor a flag names one
const DEFAULT_OUTPUT_DIR: &str = "api";

const WATCH_DEBOUNCE_MS: u64 = 200;

#[derive(Parser)]
#[command(name = "clientgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a TypeScript client from an OpenAPI document
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Config file (YAML, JSON or TOML); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path or URL to the OpenAPI document (YAML or JSON)
    ///
    /// Example: --schema-path path/to/openapi.yaml
    /// Example: --schema-path https://example.com/openapi.json
    #[arg(long)]
    schema_path: Option<String>,
    /// Output directory for generated code (default: api)
    #[arg(long)]
    output_dir: Option<String>,
    /// Directory with template overrides
    #[arg(long)]
    template_dir: Option<String>,
    /// Group name for operations without tags (default: default)
    #[arg(long)]
    fallback_tag: Option<String>,
    /// Fail when two generated names collide instead of suffixing them
    #[arg(long)]
    strict_names: bool,
    /// Do not emit the request contract module
    #[arg(long)]
    no_request_contract: bool,
    /// Regenerate whenever the schema file changes
    #[arg(long)]
    watch: bool,
}

impl GenerateArgs {
    /// Config file values with command-line flags applied on top
    async fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => {
                let schema_path = self
                    .schema_path
                    .clone()
                    .context("--schema-path is required when no --config is given")?;
                Config::new(schema_path, DEFAULT_OUTPUT_DIR)
            }
        };

        if let Some(schema_path) = &self.schema_path {
            config.schema_path = schema_path.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(template_dir) = &self.template_dir {
            config.template_dir = Some(template_dir.clone());
        }
        if let Some(fallback_tag) = &self.fallback_tag {
            config.options.fallback_tag = fallback_tag.clone();
        }
        if self.strict_names {
            config.options.strict_names = true;
        }
        if self.no_request_contract {
            config.options.emit_request_contract = false;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate(args) => {
            let config = args.resolve_config().await?;
            run(&config).await?;
            if args.watch {
                watch(&config).await?;
            }
        }
    }
    Ok(())
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let artifacts = generate(config)
        .await
        .with_context(|| format!("Failed to generate client from {}", config.schema_path))?;
    for name in artifacts.keys() {
        debug!(artifact = %name, "generated");
    }
    info!(
        artifacts = artifacts.len(),
        output_dir = %config.output_dir,
        "client generated"
    );
    Ok(())
}

/// Regenerate on every change to the schema file until Ctrl-C
async fn watch(config: &Config) -> anyhow::Result<()> {
    if remote_url(&config.schema_path).is_some() {
        anyhow::bail!("--watch needs a local schema file, got {}", config.schema_path);
    }
    let schema = tokio::fs::canonicalize(&config.schema_path)
        .await
        .with_context(|| format!("Failed to resolve {}", config.schema_path))?;
    let watch_dir = schema
        .parent()
        .map(Path::to_path_buf)
        .context("Schema file has no parent directory")?;

    // Editors often replace the file, so watch its directory rather than the file itself
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        let _ = tx.send(result);
    })
    .context("Failed to create file watcher")?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", watch_dir.display()))?;

    info!(schema = %schema.display(), "watching for changes, press Ctrl-C to stop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut debounce: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("stopping watcher");
                break;
            }
            maybe = rx.recv() => {
                let Some(result) = maybe else {
                    debug!("watcher channel closed");
                    break;
                };
                match result {
                    Ok(event) if touches(&event, &schema) => {
                        debug!(kind = ?event.kind, "schema changed");
                        debounce = Some(Box::pin(tokio::time::sleep(Duration::from_millis(
                            WATCH_DEBOUNCE_MS,
                        ))));
                    }
                    Ok(_) => {}
                    Err(err) => warn!("watcher error: {err}"),
                }
            }
            _ = settle(&mut debounce) => {
                debounce = None;
                info!("regenerating");
                if let Err(err) = run(config).await {
                    error!("{err:#}");
                }
            }
        }
    }
    Ok(())
}

/// Completes when the pending debounce elapses; never completes without one
async fn settle(debounce: &mut Option<Pin<Box<Sleep>>>) {
    match debounce {
        Some(sleep) => sleep.await,
        None => std::future::pending().await,
    }
}

fn touches(event: &Event, schema: &Path) -> bool {
    !matches!(event.kind, EventKind::Access(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == schema.file_name())
}
