use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "triagent")]
#[command(version, about = "Multi-agent triage for corporate IT and finance support")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive support chat
    Chat,

    /// Ask a single question and exit
    Ask {
        #[arg(help = "The support question")]
        query: String,
    },

    /// Search the policy documents directly
    Docs {
        #[arg(help = "Search query")]
        query: String,
    },

    /// Run the guardrail self-test
    Check,

    /// Check provider and store health
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show,
    /// Show configuration file paths
    Path,
    /// Initialize project configuration
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    use triagent::cli::commands;

    match cli.command {
        Commands::Chat => {
            let rt = Runtime::new()?;
            rt.block_on(commands::chat::run())?;
        }
        Commands::Ask { query } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::ask::run(&query))?;
        }
        Commands::Docs { query } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::docs::run(&query))?;
        }
        Commands::Check => {
            commands::check::run()?;
        }
        Commands::Doctor => {
            let rt = Runtime::new()?;
            rt.block_on(commands::doctor::run())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::show()?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
