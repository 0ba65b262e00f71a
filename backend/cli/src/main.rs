mod config;
mod config_cmd;
mod doctor_cmd;
mod review_cmd;
mod serve_cmd;
mod status_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "codereview")]
#[command(about = "CodeReview: LLM code review relay and terminal chat")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.codereview/config.yaml)
    #[arg(long, global = true, env = "CODEREVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the review relay server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Open the terminal chat
    Chat {
        #[arg(long)]
        relay_url: Option<String>,
    },
    /// Review one file and print the result as plain text
    Review {
        file: PathBuf,
        #[arg(long)]
        relay_url: Option<String>,
    },
    /// Show whether the relay is running
    Status {
        #[arg(long)]
        relay_url: Option<String>,
    },
    /// Check config and relay connectivity
    Doctor,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective config with secrets masked
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = config::resolve_path(cli.config);
    if let Commands::Config {
        command: ConfigCommand::Path,
    } = cli.command
    {
        println!("{}", path.display());
        return Ok(());
    }

    let loaded = config::load(path).await?;
    let log = loaded.config.logging.clone();
    match cli.command {
        Commands::Serve { .. } => logging::init_logger(&log.dir, &log.level),
        Commands::Chat { .. } => logging::init_file_logger(&log.dir, &log.level),
        _ => logging::init_console_logger(&log.level),
    }
    loaded.log_startup();

    match cli.command {
        Commands::Serve { port, bind } => {
            serve_cmd::run(loaded, port, bind).await?;
        }
        Commands::Chat { relay_url } => {
            let mut client = loaded.config.client.clone();
            client.relay_url = config::relay_url(&loaded.config, relay_url);
            tui::run_chat(&client).await?;
        }
        Commands::Review { file, relay_url } => {
            let url = config::relay_url(&loaded.config, relay_url);
            review_cmd::run(&file, &url, loaded.config.client.max_upload_bytes).await?;
        }
        Commands::Status { relay_url } => {
            status_cmd::run(&config::relay_url(&loaded.config, relay_url)).await?;
        }
        Commands::Doctor => doctor_cmd::run(&loaded).await?,
        Commands::Config { command } => match command {
            ConfigCommand::Show => println!("{}", config_cmd::show(&loaded)?),
            ConfigCommand::Path => println!("{}", loaded.path.display()),
        },
    }

    Ok(())
}
