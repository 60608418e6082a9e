use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use uspy_client::{AccountApi, ApiClient, ClientConfig, tracing::init_tracing};
use uspy_model::{Credentials, SubjectKey};
use uspy_review::ReviewChoice;
use uspy_view::{SubjectDetailView, messages};

mod cli;
mod render;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --help and usage errors must not depend on the environment
    let cli = Cli::parse();

    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env().context("failed to read USPY_* settings")?;

    init_tracing(&config.env)?;

    let client = ApiClient::new(&config)?;

    match cli.command {
        Command::Subject { subject, stream } => show_subject(client, subject.key(), stream).await,
        Command::Review { subject, answer } => review(client, subject.key(), answer).await,
        Command::Whoami => whoami(&client).await,
        Command::Login { login, password } => log_in(&client, login, password).await,
        Command::ResetPassword { email } => reset_password(&client, &email).await,
    }
}

async fn load_view(client: ApiClient, key: SubjectKey, stream: bool) -> SubjectDetailView {
    let mut view = SubjectDetailView::new(key);

    if stream {
        let mut updates = view.spawn_load(Arc::new(client));
        while let Some(update) = updates.recv().await {
            tracing::debug!(slice = update.slice.name(), "slice received");
            view.apply(update);
        }
    } else {
        view.load(&client).await;
    }

    view
}

async fn show_subject(client: ApiClient, key: SubjectKey, stream: bool) -> anyhow::Result<()> {
    let view = load_view(client, key, stream).await;
    print_page(&view)
}

async fn review(client: ApiClient, key: SubjectKey, answer: ReviewChoice) -> anyhow::Result<()> {
    let mut view = load_view(client.clone(), key, false).await;

    view.submit_review(&client, answer)
        .await
        .context("review was not saved")?;

    print_page(&view)
}

fn print_page(view: &SubjectDetailView) -> anyhow::Result<()> {
    let body = view.page()?;
    print!("{}", render::page(&view.breadcrumbs(), &body));
    Ok(())
}

async fn whoami(client: &ApiClient) -> anyhow::Result<()> {
    match client.current_user().await? {
        Some(user) => println!("{}", user.user),
        None => println!("{}", messages::LOGIN_REQUIRED),
    }
    Ok(())
}

async fn log_in(client: &ApiClient, login: String, password: String) -> anyhow::Result<()> {
    client
        .login(&Credentials { login, password })
        .await
        .context("login failed")?;

    let session = client
        .session()
        .context("the API did not return a session cookie")?;
    println!("USPY_SESSION={session}");
    Ok(())
}

async fn reset_password(client: &ApiClient, email: &str) -> anyhow::Result<()> {
    let result = client.request_password_reset(email).await;
    let feedback = messages::password_reset_feedback(&result);

    match result {
        Ok(()) => {
            println!("{feedback}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}: {feedback}", messages::PASSWORD_RESET_TITLE);
            Err(e.into())
        }
    }
}
