use std::path::Path;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use upkeep_core::SessionTarget;
use upkeep_store::{LedgerSource, LedgerStore};
use upkeep_wpcli::WpCli;

mod config;
mod flows;
mod render;


#[derive(Parser, Debug)]
#[command(name = "upkeep")]
#[command(about = "WordPress update ledger and rollback driver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check for updates, apply them, and record the session
    Run {
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        alias: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Downgrade every asset recorded in a session
    Rollback {
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        alias: Option<String>,
        #[arg(long)]
        dry_run: bool,
        #[arg(long, default_value = "latest")]
        session: String,
    },
    /// List recorded update sessions
    List {
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        alias: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(Path::new("."))?;
    let style = render::resolve_output_style();

    match cli.command {
        Commands::Run {
            file,
            alias,
            dry_run,
        } => {
            let store = ledger_store(file, &config);
            let executor = build_executor(alias, dry_run, &config)?;
            flows::run_update_command(&store, &executor, dry_run, style)
        }
        Commands::Rollback {
            file,
            alias,
            dry_run,
            session,
        } => {
            let target = SessionTarget::parse(&session).ok_or_else(|| {
                anyhow!("invalid session target '{session}'; use a session number or 'latest'")
            })?;
            let store = ledger_store(file, &config);
            let executor = build_executor(alias, dry_run, &config)?;
            flows::run_rollback_command(&store, &executor, target, dry_run, style)
        }
        Commands::List { file, .. } => {
            let store = ledger_store(file, &config);
            flows::run_list_command(&store)
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "upkeep", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn ledger_store(file_flag: Option<String>, config: &config::CliConfig) -> LedgerStore {
    let file = config::resolve_ledger_file(file_flag, config);
    LedgerStore::new(LedgerSource::parse(&file))
}

fn build_executor(
    alias_flag: Option<String>,
    dry_run: bool,
    config: &config::CliConfig,
) -> Result<WpCli> {
    let binary = config::resolve_wp_binary(
        std::env::var(config::WP_BIN_ENV_VAR).ok().as_deref(),
        config,
    );
    let mut executor = WpCli::new(binary, dry_run);
    if let Some(alias) = config::resolve_alias(alias_flag, config) {
        executor.resolve_alias(&alias)?;
    }
    Ok(executor)
}
