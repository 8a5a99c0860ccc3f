//! webremote CLI — inspect read-only commit remotes.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use webremote_core::{RemoteRegistry, Tag};

use config::RemotesConfig;

#[derive(Parser)]
#[command(name = "webremote", version, about = "Read-only commit remotes over HTTP")]
struct Cli {
    /// Log adapter activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Path to remotes.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an identifier (e.g. s3web://host/path) into remote properties
    FromUrl {
        /// Remote identifier
        identifier: String,
        /// Extra option (key=value), may be repeated
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },
    /// Translate an s3web location back into an identifier
    ToUrl {
        /// Location (e.g. http://host/path)
        location: String,
    },
    /// List commits, newest first
    List {
        /// Remote name from remotes.toml, or an identifier
        remote: String,
        /// Only commits carrying this tag (key or key=value), may be repeated
        #[arg(long = "tag", value_parser = parse_tag)]
        tags: Vec<Tag>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single commit
    Get {
        /// Remote name from remotes.toml, or an identifier
        remote: String,
        /// Commit ID
        id: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a remote's configuration
    Validate {
        /// Remote name from remotes.toml, or an identifier
        remote: String,
    },
    /// Show remote types and configured remotes
    Remotes,
}

fn parse_option(s: &str) -> Result<(String, String), String> {
    commands::remote::parse_option(s).map_err(|e| e.to_string())
}

fn parse_tag(s: &str) -> Result<Tag, String> {
    s.parse::<Tag>().map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,webremote=debug,webremote_core=debug,webremote_s3web=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_registry() -> RemoteRegistry {
    let mut registry = RemoteRegistry::new();
    webremote_s3web::register(&mut registry);
    registry
}

fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<RemotesConfig> {
    if let Some(path) = explicit {
        return RemotesConfig::load(path);
    }
    let cwd = std::env::current_dir()?;
    Ok(match RemotesConfig::find_and_load(&cwd)? {
        Some((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded remotes");
            config
        }
        None => RemotesConfig::default(),
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = build_registry();

    match cli.command {
        Commands::FromUrl {
            identifier,
            options,
        } => commands::remote::from_url(&registry, &identifier, &options),

        Commands::ToUrl { location } => commands::remote::to_url(&registry, &location),

        Commands::List { remote, tags, json } => {
            let config = load_config(cli.config.as_ref())?;
            commands::commits::list(&registry, &config, &remote, &tags, json)
        }

        Commands::Get { remote, id, json } => {
            let config = load_config(cli.config.as_ref())?;
            commands::commits::get(&registry, &config, &remote, &id, json)
        }

        Commands::Validate { remote } => {
            let config = load_config(cli.config.as_ref())?;
            commands::remote::validate(&registry, &config, &remote)
        }

        Commands::Remotes => {
            let config = load_config(cli.config.as_ref())?;
            commands::remote::list(&registry, &config)
        }
    }
}
