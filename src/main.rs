use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gurobi")]
#[command(about = "GU/RO/BI divisibility classifier and item-store client")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP classifier service
    Serve {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind the server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Classify tokens locally and print status and label
    Classify {
        /// Tokens to classify
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Item store queries
    Items {
        /// Database path (defaults to the user data directory)
        #[arg(long, global = true)]
        db: Option<PathBuf>,

        #[command(subcommand)]
        command: ItemsCommands,
    },
}

#[derive(Subcommand)]
enum ItemsCommands {
    /// Show the most expensive item of a group
    Top {
        /// Group name
        group: String,
    },
    /// Set an item's price, inserting the item if it does not exist
    Upsert {
        /// Item id
        id: String,
        /// New price
        price: f64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Serve { config, host, port } => {
            commands::serve::run(commands::serve::ServeArgs { config, host, port }).await?;
        }
        Commands::Classify { tokens } => {
            if !commands::classify::run(&tokens) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Items { db, command } => match command {
            ItemsCommands::Top { group } => commands::items::top(&group, db).await?,
            ItemsCommands::Upsert { id, price } => commands::items::upsert(&id, price, db).await?,
        },
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_items_upsert() {
        let cli = Cli::try_parse_from(["gurobi", "items", "upsert", "item1", "14"]).unwrap();
        match cli.command {
            Commands::Items {
                command: ItemsCommands::Upsert { id, price },
                db,
            } => {
                assert_eq!(id, "item1");
                assert_eq!(price, 14.0);
                assert!(db.is_none());
            }
            _ => panic!("expected items upsert"),
        }
    }

    #[test]
    fn classify_requires_a_token() {
        assert!(Cli::try_parse_from(["gurobi", "classify"]).is_err());
    }

    #[test]
    fn serve_flags_override_config() {
        let args = commands::serve::ServeArgs {
            config: None,
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
        };
        let config = commands::serve::resolve_config(args).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn serve_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gurobi.toml");
        std::fs::write(&path, "enable_cors = true\n").unwrap();
        let args = commands::serve::ServeArgs {
            config: Some(path),
            host: None,
            port: Some(4000),
        };
        let config = commands::serve::resolve_config(args).unwrap();
        assert!(config.enable_cors);
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn classify_command_reports_failures() {
        assert!(commands::classify::run(&["30".to_string(), "7".to_string()]));
        assert!(!commands::classify::run(&["0".to_string()]));
    }
}
