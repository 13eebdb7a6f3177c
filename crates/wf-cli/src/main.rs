use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::error;
use std::process::ExitCode;
use std::sync::Arc;
use wf_api::{ApiClient, FileTokenStore, TokenStore};
use wf_core::{MockData, Route, get_wf_setting};

mod components;
mod models;

use components::api::{ApiArgs, handle_api};
use components::auth::{LoginArgs, handle_login, handle_logout, handle_token};
use components::fleet::{screenshots_listing, tasks_listing, workers_listing};

#[derive(Parser)]
#[command(name = "wf")]
#[command(version)]
#[command(about = "Operations console for the Worker Factory fleet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal console (the default)
    Tui {
        /// Page to open on, e.g. `/workers/wk_7f3a21`
        #[arg(long, short, default_value = "/")]
        route: Route,
    },
    /// Store a token pair
    Login(LoginArgs),
    /// Forget the stored token pair
    Logout,
    /// Show the stored access token, masked
    Token,
    /// Call the API with the stored credentials
    Api(ApiArgs),
    /// List the fleet
    Workers,
    /// List a worker's tasks
    Tasks { worker_id: String },
    /// List a worker's screenshots
    Screenshots { worker_id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui {
        route: Route::Dashboard,
    });

    // the console captures logs itself; anything else logs to stderr
    let is_tui = matches!(command, Commands::Tui { .. });
    if !is_tui {
        env_logger::init();
    }

    match _main(command, token_store).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_tui => {
            // no logger is installed once the terminal is restored
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn token_store() -> Result<Arc<dyn TokenStore>, Box<dyn std::error::Error>> {
    Ok(Arc::new(FileTokenStore::from_settings()?))
}

/// `tokens` is only called by commands that use the stored token pair
async fn _main(
    command: Commands,
    tokens: impl Fn() -> Result<Arc<dyn TokenStore>, Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_workers = get_wf_setting!(WF_MAX_WORKERS, usize);

    match command {
        Commands::Tui { route } => wf_tui::tui_main(route, tokens()?).await?,
        Commands::Login(args) => handle_login(args, tokens()?.as_ref())?,
        Commands::Logout => handle_logout(tokens()?.as_ref())?,
        Commands::Token => handle_token(tokens()?.as_ref()),
        Commands::Api(args) => {
            let client = ApiClient::from_settings(tokens()?);
            handle_api(args, &client).await?
        }
        Commands::Workers => print!("{}", workers_listing(&MockData::load()?, max_workers)),
        Commands::Tasks { worker_id } => print!("{}", tasks_listing(&MockData::load()?, &worker_id)?),
        Commands::Screenshots { worker_id } => {
            print!("{}", screenshots_listing(&MockData::load()?, &worker_id)?)
        }
    }
    Ok(())
}
