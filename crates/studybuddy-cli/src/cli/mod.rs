//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use studybuddy_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(version = "0.1")]
#[command(about = "Terminal client for the StudyBuddy flashcard service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session credential
    Login {
        /// Account email address
        #[arg(long, conflicts_with = "google")]
        email: Option<String>,

        /// Account password (read from stdin when omitted)
        #[arg(long, requires = "email")]
        password: Option<String>,

        /// Log in with a Google identity token instead
        #[arg(long, value_name = "ID_TOKEN")]
        google: Option<String>,
    },
    /// Remove the stored session credential
    Logout,
    /// Check whether the stored session is valid (exit code 1 when it is not)
    Status,
    /// Browse and create tags
    Tags {
        #[command(subcommand)]
        command: TagsCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TagsCommands {
    /// List all tags
    List,
    /// Create a tag unless one with the same name exists
    Add {
        /// Tag name
        name: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&config::paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive UI
    let Some(command) = cli.command else {
        return crate::modes::run_interactive(&config).await;
    };

    match command {
        Commands::Login {
            email,
            password,
            google,
        } => match (email, google) {
            (Some(email), None) => commands::auth::login_password(&config, &email, password).await,
            (None, Some(id_token)) => commands::auth::login_google(&config, &id_token).await,
            _ => anyhow::bail!("Specify exactly one of --email or --google"),
        },
        Commands::Logout => commands::auth::logout(),
        Commands::Status => commands::auth::status(),
        Commands::Tags { command } => match command {
            TagsCommands::List => commands::tags::list(&config).await,
            TagsCommands::Add { name } => commands::tags::add(&config, &name).await,
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
