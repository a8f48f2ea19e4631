//! Print the path of every gitlab project the token has access to, sorted by name.

use std::io::{Write as _, stderr, stdout};
use std::process::ExitCode;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

use gitlab_projects::config::Config;
use gitlab_projects::gitlab::get_all_projects;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok().take();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let connection = match config.connect() {
        Ok(connection) => connection,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let projects = match get_all_projects(&connection).await {
        Ok(projects) => projects,
        Err(err) => {
            error!("Failed to get all projects: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!("{} projects found on {}", projects.len(), config.hostname);

    let mut out = stdout().lock();
    for project in projects {
        if let Err(err) = writeln!(out, "{project}") {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
