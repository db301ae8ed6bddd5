use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use unitalk_client::api::{progress, UniTalkApi};
use unitalk_client::auth::store::TokenStore;
use unitalk_client::config::{load_config, ClientConfig};
use unitalk_client::observability::logging::init_logging;
use unitalk_client::{ApiClient, FileTokenStore, SessionManager};

#[derive(Parser)]
#[command(name = "unitalk-cli")]
#[command(about = "Command-line client for the UniTalk interview-practice backend", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the credential pair
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show the current session identity
    Me,
    /// List practice questions
    Questions,
    /// Show per-category progress from scored answers
    Progress,
    /// Clear the stored session
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };

    let credentials_file = config
        .credentials_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(".unitalk-credentials.json"));
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(credentials_file));

    let client = Arc::new(ApiClient::new(&config, store.clone())?);
    let api = UniTalkApi::new(client, &config);
    let session = SessionManager::new(store);

    match cli.command {
        Commands::Login { username, password } => {
            let tokens = api.login(&username, &password).await?;
            let identity = session.login(&tokens.access, &tokens.refresh)?;
            println!("Logged in as {} ({})", identity.display_name, identity.role);
        }
        Commands::Me => match session.restore() {
            Some(identity) => {
                println!(
                    "{} (#{}) [{}]",
                    identity.display_name, identity.subject_id, identity.role
                );
            }
            None => println!("No active session."),
        },
        Commands::Questions => {
            for question in api.questions().await? {
                println!(
                    "#{:<4} [{} / {} / {}] {}",
                    question.id,
                    question.category,
                    question.subcategory,
                    question.difficulty,
                    question.question
                );
            }
        }
        Commands::Progress => {
            let answers = api.student_answers().await?;
            let by_category = progress::performance_by_category(&answers);
            if by_category.is_empty() {
                println!("No scored answers yet.");
            }
            for bucket in by_category {
                println!(
                    "{:<24} {:>5.1}%  ({} answers)",
                    bucket.key, bucket.average_score, bucket.count
                );
            }
        }
        Commands::Logout => {
            session.logout();
            println!("Session cleared.");
        }
    }

    Ok(())
}
