//! Bamboo CLI - command line access to Bamboo projects and plans

mod commands;

use bamboo_core::{Config, Secrets};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{PlanArgs, ProjectArgs};

/// Query and manage Bamboo projects and plans
#[derive(Parser, Debug)]
#[command(name = "bamboo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Bamboo server URL (overrides config and env)
    #[arg(long, global = true, env = "BAMBOO_URL")]
    server: Option<String>,

    /// Username for basic auth (overrides config and env)
    #[arg(long, global = true, env = "BAMBOO_USERNAME")]
    username: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Project operations
    #[command(visible_alias = "p")]
    Project(ProjectArgs),

    /// Plan operations
    Plan(PlanArgs),

    /// Show current configuration
    Config {
        /// Write a secrets file template if none exists
        #[arg(long)]
        init_secrets: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = Config::load_with_overrides(cli.server.clone(), cli.username.clone())?;

    if cli.verbose {
        tracing::info!(
            server = %config.server.url,
            username = ?config.server.username,
            timeout = ?config.server.timeout,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("bamboo {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Project(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Plan(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config { init_secrets }) => {
            if init_secrets {
                let path = Secrets::init_template()?;
                println!("Created secrets template at {}", path.display());
                println!();
            }

            println!("Bamboo Configuration");
            println!("====================");
            println!();
            println!("Server Settings:");
            println!("  url: {}", config.server.url);
            println!(
                "  username: {}",
                config.server.username.as_deref().unwrap_or("(none - bearer token)")
            );
            println!("  timeout: {:?}", config.server.timeout);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            if let Some(path) = Secrets::default_secrets_path() {
                println!("Secrets file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - run `bamboo config --init-secrets`)");
                }
            }
        }
        None => {
            println!("Bamboo - command line access to Bamboo projects and plans");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
