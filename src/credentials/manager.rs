use std::sync::Arc;

use super::{
    CeremonyError, CeremonyResult, CredentialEntryBuilder, ListingError, VerificationSession,
};
use crate::options::{PasskeyAttestationOptions, UserVerificationRequirement, decode_or_none};
use crate::platform::{CredentialEntry, CredentialRequest};
use crate::sdk::{CredentialSdk, Fido2CallbackError, Fido2CredentialStore};
use crate::vault::{CipherListView, CipherMatcher, CipherView, VaultRepository};

/// Routes credential-provider requests to the credential SDK.
///
/// Holds the verification session for a single provider invocation; build a
/// new manager per invocation. Ceremonies on one manager must not overlap.
pub struct CredentialManager {
    pub(crate) sdk: Arc<dyn CredentialSdk>,
    credential_store: Arc<dyn Fido2CredentialStore>,
    pub(crate) vault: Arc<dyn VaultRepository>,
    pub(crate) matcher: Arc<dyn CipherMatcher>,
    pub(crate) entry_builder: CredentialEntryBuilder,
    session: VerificationSession,
}

/// Outcome of [`CredentialManager::route`].
#[derive(Debug)]
pub enum CredentialResponse {
    Registered(CeremonyResult),
    Authenticated(CeremonyResult),
    Entries(Result<Vec<CredentialEntry>, ListingError>),
}

impl CredentialManager {
    pub fn new(
        sdk: Arc<dyn CredentialSdk>,
        credential_store: Arc<dyn Fido2CredentialStore>,
        vault: Arc<dyn VaultRepository>,
        matcher: Arc<dyn CipherMatcher>,
    ) -> Self {
        Self {
            sdk,
            credential_store,
            vault,
            matcher,
            entry_builder: CredentialEntryBuilder,
            session: VerificationSession::new(),
        }
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn is_user_verified(&self) -> bool {
        self.session.is_user_verified()
    }

    pub fn has_authentication_attempts_remaining(&self) -> bool {
        self.session.has_authentication_attempts_remaining()
    }

    pub fn passkey_attestation_options(
        &self,
        request_json: &str,
    ) -> Option<PasskeyAttestationOptions> {
        decode_or_none(request_json)
    }

    pub fn resolve_verification_requirement<R>(
        &self,
        request: &R,
        fallback: UserVerificationRequirement,
    ) -> UserVerificationRequirement
    where
        R: super::VerificationRequirementSource + ?Sized,
    {
        super::resolve_verification_requirement(request, fallback)
    }

    /// Dispatch any inbound request, resolving the selected cipher first.
    pub async fn route(&self, request: CredentialRequest) -> CredentialResponse {
        match request {
            CredentialRequest::RegisterPublicKey {
                user_id,
                calling_app_info,
                request,
                selected_cipher_id,
            } => {
                let result = match self.selected_cipher(&selected_cipher_id).await {
                    Ok(cipher) => {
                        self.register_credential(&user_id, &calling_app_info, &request, cipher)
                            .await
                    }
                    Err(e) => Err(e),
                };
                CredentialResponse::Registered(result)
            }
            CredentialRequest::AuthenticatePublicKey {
                user_id,
                calling_app_info,
                option,
                selected_cipher_id,
                origin,
            } => {
                let result = match self.selected_cipher(&selected_cipher_id).await {
                    Ok(cipher) => {
                        self.authenticate_credential(
                            &user_id,
                            &calling_app_info,
                            &option,
                            cipher,
                            origin.as_deref(),
                        )
                        .await
                    }
                    Err(e) => Err(e),
                };
                CredentialResponse::Authenticated(result)
            }
            CredentialRequest::GetCredentials(request) => {
                CredentialResponse::Entries(self.list_credential_entries(&request).await)
            }
        }
    }

    async fn selected_cipher(&self, cipher_id: &str) -> Result<CipherView, CeremonyError> {
        self.vault.get_cipher(cipher_id).await.map_err(|e| {
            tracing::error!(cipher_id, error = %e, "Selected cipher unavailable");
            CeremonyError::InternalError
        })
    }
}

#[async_trait::async_trait]
impl Fido2CredentialStore for CredentialManager {
    async fn find_credentials(
        &self,
        ids: Option<Vec<Vec<u8>>>,
        rp_id: String,
    ) -> Result<Vec<CipherView>, Fido2CallbackError> {
        self.credential_store.find_credentials(ids, rp_id).await
    }

    async fn all_credentials(&self) -> Result<Vec<CipherListView>, Fido2CallbackError> {
        self.credential_store.all_credentials().await
    }

    async fn save_credential(&self, cipher: CipherView) -> Result<(), Fido2CallbackError> {
        self.credential_store.save_credential(cipher).await
    }
}
