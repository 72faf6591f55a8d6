//! Catalog Integrity CLI - duplicate and integrity reports for the catalog
//!
//! # Main Commands
//!
//! ```bash
//! catalog-integrity serve                              # Start HTTP server (port 3000)
//! catalog-integrity analyze snapshot.json              # Full report as JSON
//! catalog-integrity fetch-analyze https://cms/export   # Analyze the live catalog store
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! catalog-integrity validate snapshot.json             # Validate a snapshot against the schema
//! catalog-integrity normalize "Étienne  Dupré!"        # Show similarity keys
//! ```

use catalog_integrity::{
    exact_name_key, normalize, run_analysis, validate_snapshot, AnalysisConfig, AnalysisOptions,
    FileSnapshotProvider, HttpSnapshotProvider, ReportSummary, ServerConfig, SnapshotProvider,
};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "catalog-integrity")]
#[command(about = "Detect duplicate records and integrity issues in the catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a snapshot JSON file
    Analyze {
        /// Input snapshot file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only output the totals summary
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        locales: LocaleArgs,
    },

    /// Fetch a snapshot from the catalog store export API and analyze it
    FetchAnalyze {
        /// Export API base URL (serves /assets, /works, /artists, ...)
        base_url: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only output the totals summary
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        locales: LocaleArgs,
    },

    /// Validate a snapshot JSON file against the snapshot schema
    Validate {
        /// Input snapshot file
        input: PathBuf,
    },

    /// Show the exact and normalized keys of names
    Normalize {
        /// Names to normalize
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: $PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Snapshot file or export URL analyzed by GET /api/integrity
        /// (default: $CATALOG_SNAPSHOT)
        #[arg(short, long)]
        snapshot: Option<String>,
    },
}

/// Locale overrides, on top of the environment.
#[derive(Args)]
struct LocaleArgs {
    /// Locale compared for names and titles
    #[arg(long)]
    primary_locale: Option<String>,

    /// Second locale checked for artist bios
    #[arg(long)]
    secondary_locale: Option<String>,
}

impl LocaleArgs {
    fn into_config(self) -> AnalysisConfig {
        let mut config = AnalysisConfig::from_env();
        if let Some(locale) = self.primary_locale {
            config.primary_locale = locale;
        }
        if let Some(locale) = self.secondary_locale {
            config.secondary_locale = locale;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            summary,
            locales,
        } => {
            eprintln!("📄 Analyzing: {}", input.display());
            let provider = FileSnapshotProvider::new(&input);
            cmd_analyze(&provider, locales.into_config(), output.as_deref(), summary).await
        }

        Commands::FetchAnalyze {
            base_url,
            output,
            summary,
            locales,
        } => {
            eprintln!("🌐 Fetching: {}", base_url);
            let provider = HttpSnapshotProvider::new(&base_url);
            cmd_analyze(&provider, locales.into_config(), output.as_deref(), summary).await
        }

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Normalize { text } => cmd_normalize(&text),

        Commands::Serve { port, snapshot } => cmd_serve(port, snapshot).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_analyze<P: SnapshotProvider>(
    provider: &P,
    config: AnalysisConfig,
    output: Option<&Path>,
    summary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("   Primary locale: {}", config.primary_locale);

    // Ctrl-C cancels the run instead of killing it mid-write
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let options = AnalysisOptions::new(config).with_cancel(cancel);
    let result = run_analysis(provider, &options).await;
    watcher.abort();
    let report = result?;

    let json = if summary {
        serde_json::to_string_pretty(&ReportSummary::from(&report))?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    write_output(&json, output)?;

    if report.is_clean() {
        eprintln!("\n✨ Catalog is clean!");
    } else {
        eprintln!("\n📊 {} findings", report.totals().findings());
    }
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let document: Value = serde_json::from_str(&content)?;

    match validate_snapshot(&document) {
        Ok(()) => {
            let counts: Vec<String> = ["assets", "works", "artists", "categories", "labels"]
                .iter()
                .map(|kind| {
                    let len = document[kind].as_array().map_or(0, Vec::len);
                    format!("{} {}", len, kind)
                })
                .collect();
            eprintln!("✅ Valid snapshot: {}", counts.join(", "));
            Ok(())
        }
        Err(errors) => {
            eprintln!("\n❌ {} schema errors:", errors.len());
            for err in errors.iter().take(20) {
                eprintln!("   - {}", err);
            }
            if errors.len() > 20 {
                eprintln!("   ... and {} more", errors.len() - 20);
            }
            std::process::exit(1);
        }
    }
}

fn cmd_normalize(texts: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for text in texts {
        println!("{}", text);
        println!("   exact:      {}", exact_name_key(text).unwrap_or_default());
        println!("   normalized: {}", normalize(text));
    }
    Ok(())
}

async fn cmd_serve(
    port: Option<u16>,
    snapshot: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(snapshot) = snapshot {
        config = config.with_snapshot_source(snapshot);
    }
    catalog_integrity::server::start_server(config).await
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
