pub mod caller;
pub mod config;
pub mod credentials;
pub mod diagnostics;
pub mod encoding;
pub mod error;
pub mod options;
pub mod origin;
pub mod platform;
pub mod sdk;
pub mod vault;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Command, Config};
use credentials::{CredentialManager, CredentialResponse, resolve_verification_requirement};
use platform::CredentialRequest;

pub use credentials::{CeremonyError, CeremonyResult};

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    let level = match cfg.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();

    let vault_path = match &cfg.vault {
        Some(path) => path.clone(),
        None => default_vault_path()?,
    };

    // Preflight checks
    diagnostics::check(&cfg, &vault_path)?;

    let request = read_request(cfg.command.request_path())?;
    tracing::info!(path = %cfg.command.request_path().display(), "Request loaded");

    let output = match &cfg.command {
        Command::Origin { .. } => resolve_origin(&request)?,
        Command::Verification { fallback, .. } => serde_json::json!({
            "userVerification": resolve_verification_requirement(&request, (*fallback).into()),
        }),
        Command::Entries { .. } => list_entries(request, &vault_path).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn list_entries(
    request: CredentialRequest,
    vault_path: &Path,
) -> error::Result<serde_json::Value> {
    let CredentialRequest::GetCredentials(listing) = request else {
        return Err(error::Error::Internal(
            "entries needs a getCredentials request".into(),
        ));
    };
    let vault = Arc::new(vault::SnapshotVault::load(vault_path)?);
    tracing::info!(count = vault.cipher_count(), "Vault ready");
    let manager = CredentialManager::new(
        Arc::new(sdk::SnapshotSdk),
        vault.clone(),
        vault,
        Arc::new(vault::UriCipherMatcher::default()),
    );
    match manager.route(CredentialRequest::GetCredentials(listing)).await {
        CredentialResponse::Entries(entries) => Ok(serde_json::to_value(entries?)?),
        other => Err(error::Error::Internal(format!(
            "unexpected response: {other:?}"
        ))),
    }
}

fn default_vault_path() -> anyhow::Result<PathBuf> {
    Ok(directories::ProjectDirs::from("", "", "credroute")
        .ok_or_else(|| anyhow::anyhow!("cannot determine XDG data dir"))?
        .data_dir()
        .join(config::VAULT_FILE_NAME))
}

fn read_request(path: &Path) -> error::Result<CredentialRequest> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Trust origin and client data for a ceremony request, or the error the
/// ceremony would fail with.
fn resolve_origin(request: &CredentialRequest) -> anyhow::Result<serde_json::Value> {
    let resolved = match request {
        CredentialRequest::RegisterPublicKey {
            calling_app_info,
            request,
            ..
        } => origin::registration_trust(calling_app_info, request),
        CredentialRequest::AuthenticatePublicKey {
            calling_app_info,
            option,
            origin,
            ..
        } => origin::assertion_trust(calling_app_info, option, origin.as_deref()),
        CredentialRequest::GetCredentials(_) => {
            anyhow::bail!("origin needs a registerPublicKey or authenticatePublicKey request")
        }
    };
    Ok(match resolved {
        Ok((origin, client_data)) => serde_json::json!({
            "origin": origin,
            "clientData": client_data,
        }),
        Err(e) => serde_json::json!({ "error": CeremonyError::from(e).to_string() }),
    })
}
