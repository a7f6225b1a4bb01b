pub mod cipher;
pub mod matching;
pub mod snapshot;
pub mod state;

pub use cipher::{
    CipherListView, CipherView, CopyableCipherFields, Fido2CredentialAutofillView,
    Fido2CredentialListView, Fido2CredentialView, LoginListView, LoginUriView, LoginView,
    UriMatchType,
};
pub use matching::{CipherMatcher, UriCipherMatcher};
pub use snapshot::SnapshotVault;
pub use state::{DataState, DecryptCipherListResult, loaded_cipher_list, take_until_loaded};

use tokio::sync::watch;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Why a single cipher could not be produced. Listing logs and skips these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherLookupError {
    #[error("cipher not found")]
    NotFound,
    #[error("failed to decrypt cipher: {0}")]
    Decrypt(String),
}

/// Source of decrypted vault data.
#[async_trait::async_trait]
pub trait VaultRepository: Send + Sync {
    /// Live view of the decrypted cipher index.
    fn decrypt_cipher_list_state(&self) -> watch::Receiver<DataState<DecryptCipherListResult>>;

    /// Decrypt a single cipher on demand.
    async fn get_cipher(&self, cipher_id: &str) -> Result<CipherView, CipherLookupError>;
}
