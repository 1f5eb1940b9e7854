//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use badgeforge_pinning::{PinataClient, Pinner};
use badgeforge_shared::{
    AppConfig, GenerateConfig, init_config, load_config, validate_pinata_credentials,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// BadgeForge — turn TalkToEarn uploads into mintable NFT metadata.
#[derive(Parser)]
#[command(
    name = "badgeforge",
    version,
    about = "Generate and pin NFT metadata documents from files.json upload records.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate metadata documents and the run manifest.
    Generate {
        /// Path to files.json (defaults to config value).
        #[arg(short, long)]
        input: Option<String>,

        /// Output directory (defaults to config value).
        #[arg(short, long)]
        outdir: Option<String>,

        /// Maximum description length in characters.
        #[arg(long)]
        max_desc_len: Option<usize>,
    },

    /// Pin generated metadata documents to IPFS via Pinata.
    Pin {
        /// Directory holding <key>.metadata.json documents.
        #[arg(short, long)]
        dir: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "badgeforge=info",
        1 => "badgeforge=debug",
        _ => "badgeforge=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            input,
            outdir,
            max_desc_len,
        } => cmd_generate(input.as_deref(), outdir.as_deref(), max_desc_len).await,
        Command::Pin { dir } => cmd_pin(dir.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

async fn cmd_generate(
    input: Option<&str>,
    outdir: Option<&str>,
    max_desc_len: Option<usize>,
) -> Result<()> {
    let config = load_config()?;

    // CLI flags override config file values
    let mut generate_config = GenerateConfig::from(&config);
    if let Some(input) = input {
        generate_config.input_path = PathBuf::from(input);
    }
    if let Some(outdir) = outdir {
        generate_config.output_dir = PathBuf::from(outdir);
    }
    if let Some(max_desc_len) = max_desc_len {
        generate_config.max_description_length = max_desc_len;
    }

    info!(
        input = %generate_config.input_path.display(),
        outdir = %generate_config.output_dir.display(),
        "generating metadata documents"
    );

    let result = badgeforge_core::pipeline::generate(&generate_config, Utc::now())?;

    println!();
    println!("  Metadata generation complete!");
    println!("  Documents: {}", result.document_count);
    println!("  Manifest:  {}", result.manifest_path.display());
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// pin
// ---------------------------------------------------------------------------

async fn cmd_pin(dir: Option<&str>) -> Result<()> {
    let config = load_config()?;

    // Validate credentials before doing anything
    let (api_key, api_secret) = validate_pinata_credentials(&config)?;
    let client = PinataClient::new(&config.pinata, api_key, api_secret)?;

    let dir = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));

    let documents = collect_metadata_documents(&dir)?;
    if documents.is_empty() {
        return Err(eyre!(
            "no *.metadata.json documents found in '{}' — run `badgeforge generate` first",
            dir.display()
        ));
    }

    info!(count = documents.len(), dir = %dir.display(), "pinning metadata documents");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let total = documents.len();
    let mut pinned: Vec<(String, String)> = Vec::with_capacity(total);

    for (i, path) in documents.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        spinner.set_message(format!("Pinning [{}/{total}] {name}", i + 1));

        let content = std::fs::read_to_string(path)?;
        let document: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| eyre!("'{}' is not valid JSON: {e}", path.display()))?;

        let cid = client.pin_json(&document).await?;
        pinned.push((name, cid));
    }

    spinner.finish_and_clear();

    println!();
    println!("  Pinned {total} metadata documents:");
    for (name, cid) in &pinned {
        println!("  {name}  ipfs://{cid}");
    }
    println!();

    Ok(())
}

/// List `*.metadata.json` documents in sorted order. The `index.json`
/// manifest never matches the suffix, so it is naturally skipped.
fn collect_metadata_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| eyre!("cannot read directory '{}': {e}", dir.display()))?;

    let mut documents: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy())
                .is_some_and(|name| name.ends_with(".metadata.json"))
        })
        .collect();
    documents.sort();

    Ok(documents)
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
