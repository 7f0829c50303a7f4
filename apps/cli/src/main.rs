mod args;
mod config;
mod dirs;
mod interactive;
mod logging;

use std::error::Error;
use std::io;

use args::Command;
use gateway_app::{AppPaths, AppState, DashboardState};
use interactive::Prompt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;
    if args.command == Command::Help {
        args::print_help();
        return Ok(());
    }

    let loaded = config::load_or_create().map_err(io::Error::other)?;
    logging::init(loaded.config.log_filter.as_deref());
    if loaded.created {
        tracing::info!(path = %loaded.file.display(), "created default config");
    }

    let mut config = loaded.config;
    if let Some(api) = args.api {
        config.api_base_url = api;
    }

    let app_state = if args.ephemeral {
        AppState::ephemeral(config)?
    } else {
        let paths = AppPaths::new(dirs::data_dir().map_err(io::Error::other)?);
        tracing::debug!(db = %paths.db_path.display(), "using persistent session store");
        AppState::open(config, &paths)?
    };
    tracing::debug!(api = app_state.client.base_url(), "backend configured");

    let mut prompt = Prompt::stdin();
    match args.command {
        Command::Dashboard => interactive::run(app_state.container()?, &mut prompt).await?,
        Command::Summary => print_summary(&app_state).await?,
        Command::Login { username } => login(&app_state, &username, &mut prompt).await?,
        Command::Logout => {
            if app_state.logout()? {
                println!("Logged out.");
            } else {
                println!("No access token stored.");
            }
        }
        Command::Status => {
            if app_state.has_credential()? {
                println!("Access token stored for {}.", app_state.client.base_url());
            } else {
                println!("Not logged in.");
            }
        }
        Command::Register { username, email } => {
            register(&app_state, &username, &email, &mut prompt).await?
        }
        Command::Help => args::print_help(),
    }

    Ok(())
}

async fn print_summary(app_state: &AppState) -> Result<(), Box<dyn Error>> {
    let mut container = app_state.container()?;
    let Some(dashboard) = container.dashboard_mut() else {
        return Err("not logged in; run `gateway-dashboard login <username>` first".into());
    };
    let state = dashboard.mount().await.clone();
    println!("{}", dashboard.render());
    container.pump_events();
    if let DashboardState::Failed(_) = state {
        return Err("usage summary unavailable".into());
    }
    Ok(())
}

async fn login(
    app_state: &AppState,
    username: &str,
    prompt: &mut Prompt,
) -> Result<(), Box<dyn Error>> {
    let Some(password) = prompt.ask("Password: ").await? else {
        return Err("no password provided".into());
    };
    let mut login = app_state.login_view();
    if !login.submit(username, &password).await {
        let message = login.error().unwrap_or("Login failed").to_string();
        return Err(message.into());
    }
    println!("Logged in as {username}.");
    Ok(())
}

async fn register(
    app_state: &AppState,
    username: &str,
    email: &str,
    prompt: &mut Prompt,
) -> Result<(), Box<dyn Error>> {
    let Some(password) = prompt.ask("Password: ").await? else {
        return Err("no password provided".into());
    };
    let mut view = app_state.login_view();
    let message = view.register(username, email, &password).await?;
    println!("{message}");
    Ok(())
}
