#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Vault: {0}")]
    Vault(#[from] crate::vault::VaultError),
    #[error("Listing: {0}")]
    Listing(#[from] crate::credentials::ListingError),
    #[error("{0}")]
    Internal(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
