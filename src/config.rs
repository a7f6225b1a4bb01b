use std::path::PathBuf;

use crate::options::UserVerificationRequirement;

/// Assertion attempts allowed per provider invocation.
pub const MAX_AUTHENTICATION_ATTEMPTS: u32 = 5;
pub const VAULT_FILE_NAME: &str = "vault.json";

#[derive(clap::Parser, Debug, Clone)]
#[command(name = "credroute", version)]
pub struct Config {
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Decrypted vault snapshot. Defaults to vault.json in the data dir.
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve the trust origin and client data of a ceremony request.
    Origin { request: PathBuf },
    /// Resolve the user-verification requirement of a request.
    Verification {
        request: PathBuf,
        #[arg(long, value_enum, default_value_t = VerificationFallback::Preferred)]
        fallback: VerificationFallback,
    },
    /// List the credential entries a listing request would offer.
    Entries { request: PathBuf },
}

/// `--fallback` values for the `verification` command.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFallback {
    Discouraged,
    Preferred,
    Required,
}

impl From<VerificationFallback> for UserVerificationRequirement {
    fn from(fallback: VerificationFallback) -> Self {
        match fallback {
            VerificationFallback::Discouraged => Self::Discouraged,
            VerificationFallback::Preferred => Self::Preferred,
            VerificationFallback::Required => Self::Required,
        }
    }
}

impl Command {
    pub fn request_path(&self) -> &PathBuf {
        match self {
            Self::Origin { request }
            | Self::Verification { request, .. }
            | Self::Entries { request } => request,
        }
    }

    /// Only listing reads the vault.
    pub fn needs_vault(&self) -> bool {
        matches!(self, Self::Entries { .. })
    }
}
