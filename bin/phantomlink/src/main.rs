mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "phantomlink")]
#[command(about = "LinkedIn scraping tools served over PhantomBuster", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show credential and polling configuration status
    Status,

    /// List or inspect the registered tools
    Tools {
        #[command(subcommand)]
        command: ToolsCommands,
    },

    /// Execute a tool directly
    Run {
        /// Tool name, e.g. scrape_profile
        name: String,

        /// Tool parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,

        /// Print only the markdown rendering of the result
        #[arg(long)]
        text: bool,
    },

    /// Print the record schemas the tools return
    Models {
        /// Record name, e.g. Profile (all when omitted)
        name: Option<String>,
    },
}

#[derive(Subcommand)]
enum ToolsCommands {
    /// List all registered tools
    List,
    /// Show a tool's full parameter schema
    Info {
        /// Tool name
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Status => {
            commands::status::run().await?;
        }
        Commands::Tools { command } => match command {
            ToolsCommands::List => {
                commands::tools_cmd::list().await?;
            }
            ToolsCommands::Info { name } => {
                commands::tools_cmd::info(&name).await?;
            }
        },
        Commands::Run { name, params, text } => {
            commands::run_cmd::tool(&name, &params, text).await?;
        }
        Commands::Models { name } => {
            commands::models_cmd::show(name.as_deref())?;
        }
    }

    Ok(())
}
