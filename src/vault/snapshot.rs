use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::{
    CipherListView, CipherLookupError, CipherView, DataState, DecryptCipherListResult, VaultError,
    VaultRepository,
};
use crate::sdk::{Fido2CallbackError, Fido2CredentialStore, snapshot::credential_id_bytes};

/// On-disk form of a decrypted vault export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultSnapshot {
    #[serde(default)]
    pub ciphers: Vec<CipherView>,
}

/// In-memory vault over already decrypted ciphers.
///
/// Starts out `Loading`; [`SnapshotVault::load_ciphers`] publishes `Loaded`.
pub struct SnapshotVault {
    ciphers: RwLock<HashMap<String, CipherView>>,
    state_tx: watch::Sender<DataState<DecryptCipherListResult>>,
}

impl SnapshotVault {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(DataState::Loading);
        Self {
            ciphers: RwLock::new(HashMap::new()),
            state_tx,
        }
    }

    pub fn from_ciphers(ciphers: Vec<CipherView>) -> Self {
        let vault = Self::new();
        vault.load_ciphers(ciphers);
        vault
    }

    /// Read a [`VaultSnapshot`] JSON file.
    pub fn load(path: &Path) -> Result<Self, VaultError> {
        let bytes = std::fs::read(path)?;
        let snapshot: VaultSnapshot = serde_json::from_slice(&bytes)?;
        tracing::info!(
            path = %path.display(),
            count = snapshot.ciphers.len(),
            "Vault snapshot loaded"
        );
        Ok(Self::from_ciphers(snapshot.ciphers))
    }

    /// Replace the vault contents and publish the new index.
    pub fn load_ciphers(&self, ciphers: Vec<CipherView>) {
        let mut successes = Vec::with_capacity(ciphers.len());
        let mut failures = Vec::new();
        let mut by_id = HashMap::with_capacity(ciphers.len());
        for cipher in ciphers {
            match cipher.id.clone() {
                Some(id) => {
                    successes.push(cipher.to_list_view());
                    by_id.insert(id, cipher);
                }
                None => {
                    tracing::warn!(name = %cipher.name, "Skipping cipher without id");
                    failures.push(cipher.name);
                }
            }
        }

        match self.ciphers.write() {
            Ok(mut guard) => *guard = by_id,
            Err(poisoned) => *poisoned.into_inner() = by_id,
        }
        self.state_tx
            .send_replace(DataState::Loaded(DecryptCipherListResult { successes, failures }));
    }

    /// Publish an arbitrary state, e.g. `Loading` while a sync is in flight.
    pub fn publish(&self, state: DataState<DecryptCipherListResult>) {
        self.state_tx.send_replace(state);
    }

    pub fn cipher_count(&self) -> usize {
        self.ciphers.read().map(|g| g.len()).unwrap_or_default()
    }

    fn snapshot(&self) -> Vec<CipherView> {
        match self.ciphers.read() {
            Ok(guard) => guard.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        }
    }
}

fn holds_passkey(cipher: &CipherView, ids: Option<&[Vec<u8>]>, rp_id: &str) -> bool {
    if cipher.deleted_date.is_some() {
        return false;
    }
    let Some(login) = &cipher.login else {
        return false;
    };
    login.fido2_credentials.iter().any(|c| {
        c.rp_id == rp_id
            && ids.is_none_or(|ids| {
                credential_id_bytes(&c.credential_id).is_ok_and(|id| ids.contains(&id))
            })
    })
}

impl Default for SnapshotVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VaultRepository for SnapshotVault {
    fn decrypt_cipher_list_state(&self) -> watch::Receiver<DataState<DecryptCipherListResult>> {
        self.state_tx.subscribe()
    }

    async fn get_cipher(&self, cipher_id: &str) -> Result<CipherView, CipherLookupError> {
        let guard = self
            .ciphers
            .read()
            .map_err(|e| CipherLookupError::Decrypt(e.to_string()))?;
        guard.get(cipher_id).cloned().ok_or(CipherLookupError::NotFound)
    }
}

#[async_trait::async_trait]
impl Fido2CredentialStore for SnapshotVault {
    async fn find_credentials(
        &self,
        ids: Option<Vec<Vec<u8>>>,
        rp_id: String,
    ) -> Result<Vec<CipherView>, Fido2CallbackError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|c| holds_passkey(c, ids.as_deref(), &rp_id))
            .collect())
    }

    async fn all_credentials(&self) -> Result<Vec<CipherListView>, Fido2CallbackError> {
        Ok(self
            .snapshot()
            .iter()
            .map(CipherView::to_list_view)
            .filter(CipherListView::is_active_with_fido2_credentials)
            .collect())
    }

    async fn save_credential(&self, cipher: CipherView) -> Result<(), Fido2CallbackError> {
        let Some(id) = cipher.id.clone() else {
            return Err(Fido2CallbackError::Unknown("cipher has no id".into()));
        };
        let mut ciphers: Vec<CipherView> = self
            .snapshot()
            .into_iter()
            .filter(|c| c.id.as_deref() != Some(id.as_str()))
            .collect();
        ciphers.push(cipher);
        self.load_ciphers(ciphers);
        tracing::debug!(cipher_id = %id, "Saved passkey cipher");
        Ok(())
    }
}
