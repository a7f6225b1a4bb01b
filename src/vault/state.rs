use tokio::sync::watch;

use super::cipher::CipherListView;

/// Lifecycle of data published by the vault.
#[derive(Debug, Clone, PartialEq)]
pub enum DataState<T> {
    Loading,
    Loaded(T),
    Pending(T),
    Error { data: Option<T>, error: String },
    NoNetwork(Option<T>),
}

impl<T> DataState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Outcome of decrypting the whole cipher index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecryptCipherListResult {
    pub successes: Vec<CipherListView>,
    /// Ids of ciphers that failed to decrypt.
    pub failures: Vec<String>,
}

/// Wait until the stream publishes `Loaded` and return that single value.
///
/// Returns whatever was last published if the sender goes away first.
pub async fn take_until_loaded<T: Clone>(mut rx: watch::Receiver<DataState<T>>) -> DataState<T> {
    let loaded = rx.wait_for(DataState::is_loaded).await.map(|state| (*state).clone());
    match loaded {
        Ok(state) => state,
        Err(_) => {
            tracing::debug!("Vault state stream closed before loading finished");
            (*rx.borrow()).clone()
        }
    }
}

/// Successfully decrypted ciphers once loaded, empty otherwise.
pub async fn loaded_cipher_list(
    rx: watch::Receiver<DataState<DecryptCipherListResult>>,
) -> Vec<CipherListView> {
    match take_until_loaded(rx).await {
        DataState::Loaded(result) => result.successes,
        _ => Vec::new(),
    }
}
