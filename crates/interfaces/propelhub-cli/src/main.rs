use anyhow::Context;
use clap::{Parser, Subcommand};
use propelhub_cli::{commands, token, CliWorkflow};
use propelhub_config::{API_URL_ENV, DEFAULT_API_BASE_URL, TOKEN_ENV};
use propelhub_infra::CredentialStore;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_BASE_URL)]
    api_url: String,
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true,
          help = "Credential to use instead of the stored one")]
    token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Repository operations
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },
    /// Commit through the API
    Commit {
        #[arg(long, help = "JSON request body")]
        payload: String,
    },
    /// Fetch builds
    Builds {
        #[arg(long, help = "JSON request body")]
        payload: Option<String>,
    },
    /// Run any workflow by name
    Run {
        #[arg(value_enum)]
        workflow: CliWorkflow,
        #[arg(long, help = "JSON request body")]
        payload: Option<String>,
    },
    /// Fetch the repository, then reset its phase
    ClearPhase {
        #[arg(long, help = "JSON request body for the fetch")]
        payload: Option<String>,
    },
    /// Manage the stored credential
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    Fetch {
        #[arg(long, help = "JSON request body")]
        payload: Option<String>,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    Set { value: String },
    Clear,
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("default subscriber")?;

    let (workflow, raw_payload) = match cli.command {
        Commands::Repo {
            command: RepoCommands::Fetch { payload },
        } => (CliWorkflow::Repo, payload),
        Commands::Commit { payload } => (CliWorkflow::Commit, Some(payload)),
        Commands::Builds { payload } => (CliWorkflow::Builds, payload),
        Commands::Run { workflow, payload } => (workflow, payload),
        Commands::ClearPhase { payload } => {
            let payload = commands::parse_payload(payload.as_deref())?;
            let token = token::resolve_token(cli.token)?;
            return commands::cmd_clear_phase(&cli.api_url, token, payload).await;
        }
        Commands::Token { command } => {
            let store = CredentialStore::new()?;
            return match command {
                TokenCommands::Set { value } => token::handle_set(&store, &value),
                TokenCommands::Clear => token::handle_clear(&store),
                TokenCommands::Show => token::handle_show(&store),
            };
        }
    };

    let payload = commands::parse_payload(raw_payload.as_deref())?;
    let token = token::resolve_token(cli.token)?;
    commands::cmd_workflow(&cli.api_url, token, workflow.into(), payload).await
}
