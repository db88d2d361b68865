//! Login Entry Point
//!
//! `api` reads one `LoginRequest` JSON document from stdin and writes the
//! `LoginResponse` (or an RFC 7807 problem body) to stdout, exiting
//! non-zero on failure. `api hash-password` reads a new password from stdin
//! and prints its Argon2id PHC string for a `USERS_FILE` entry.
//!
//! Logs go to stderr. Uses `anyhow` for startup errors, but login errors are
//! reported through `kernel::error::AppError`.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use auth::models::user_password::{RawPassword, UserPassword};
use auth::presentation::dto::{LoginRequest, LoginResponse};
use auth::store::{CredentialStore, UserRecord};
use auth::{AuthConfig, AuthResult, JwtTokenIssuer, LoginResultAssembler, LoginUseCase};
use kernel::error::app_error::AppError;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Login = LoginUseCase<CredentialStore, JwtTokenIssuer>;

/// What one run writes to stdout
struct Output {
    body: String,
    success: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Auth configuration; a bad expiry policy stops startup here
    let auth_config = AuthConfig::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
        .map_err(AppError::from)
        .context("invalid auth configuration")?;

    let mut input = String::new();

    if env::args().nth(1).as_deref() == Some("hash-password") {
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("failed to read password from stdin")?;

        return match hash_password(input, auth_config.pepper()) {
            Ok(phc) => {
                println!("{}", phc);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let err = AppError::from(e);
                println!("{}", serde_json::to_string_pretty(&err.problem_details())?);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    tracing::info!(
        issuer = %auth_config.token_issuer,
        password_expiry = auth_config.password_policy.is_enabled(),
        "Auth configuration loaded"
    );

    // Credential store
    let users_file = env::var("USERS_FILE").unwrap_or_else(|_| "users.json".to_string());
    let raw = tokio::fs::read_to_string(&users_file)
        .await
        .with_context(|| format!("failed to read {}", users_file))?;
    let records: Vec<UserRecord> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", users_file))?;

    let store = CredentialStore::from_records(records, auth_config.password_pepper.clone())
        .map_err(AppError::from)
        .context("invalid user records")?;

    if store.is_empty().await {
        tracing::warn!(file = %users_file, "No users configured, every login will fail");
    } else {
        tracing::info!(users = store.len().await, file = %users_file, "Credential store ready");
    }

    let use_case = LoginUseCase::new(
        Arc::new(store),
        Arc::new(JwtTokenIssuer::new(&auth_config)),
        LoginResultAssembler::new(auth_config.password_policy),
    );

    // One login request per run
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("failed to read login request from stdin")?;

    let output = login(&use_case, &input).await?;
    println!("{}", output.body);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one login from a raw JSON request
async fn login(use_case: &Login, input: &str) -> anyhow::Result<Output> {
    let outcome = match serde_json::from_str::<LoginRequest>(input) {
        Ok(request) => match request.validate() {
            Ok(credentials) => use_case.execute(credentials).await.map_err(AppError::from),
            Err(e) => Err(AppError::from(e)),
        },
        Err(e) => Err(AppError::from(e)),
    };

    Ok(match outcome {
        Ok(result) => Output {
            body: serde_json::to_string_pretty(&LoginResponse::from(result))?,
            success: true,
        },
        Err(err) => Output {
            body: serde_json::to_string_pretty(&err.problem_details())?,
            success: false,
        },
    })
}

/// Hash a newly chosen password; one trailing line break is ignored
fn hash_password(mut input: String, pepper: Option<&[u8]>) -> AuthResult<String> {
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }

    let raw = RawPassword::new(input)?;
    let hash = UserPassword::from_raw(&raw, pepper)?;
    Ok(hash.as_phc_string().to_string())
}
