//! Seam to the external credential SDK that performs the actual WebAuthn
//! ceremonies. Nothing in this crate signs, verifies or encodes CBOR.

pub mod snapshot;
pub mod types;

pub use snapshot::SnapshotSdk;
pub use types::{
    AuthenticateFido2CredentialRequest, AuthenticatorAssertionResponse,
    AuthenticatorAttestationResponse, ClientExtensionResults, CredPropsResult,
    PublicKeyCredentialAuthenticatorAssertionResponse,
    PublicKeyCredentialAuthenticatorAttestationResponse, RegisterFido2CredentialRequest,
    SelectedCredential,
};

use crate::vault::{CipherListView, CipherView, Fido2CredentialAutofillView};

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
    #[error("rejected by the SDK: {0}")]
    Rejected(String),
    #[error("credential store callback failed: {0}")]
    Callback(#[from] Fido2CallbackError),
}

#[derive(Debug, thiserror::Error)]
pub enum Fido2CallbackError {
    #[error("The operation requires user interaction")]
    UserInterfaceRequired,
    #[error("The operation was cancelled by the user")]
    OperationCancelled,
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Credential storage the SDK calls back into during a ceremony.
#[async_trait::async_trait]
pub trait Fido2CredentialStore: Send + Sync {
    async fn find_credentials(
        &self,
        ids: Option<Vec<Vec<u8>>>,
        rp_id: String,
    ) -> Result<Vec<CipherView>, Fido2CallbackError>;

    async fn all_credentials(&self) -> Result<Vec<CipherListView>, Fido2CallbackError>;

    async fn save_credential(&self, cipher: CipherView) -> Result<(), Fido2CallbackError>;
}

#[async_trait::async_trait]
pub trait CredentialSdk: Send + Sync {
    async fn register_fido2_credential(
        &self,
        request: RegisterFido2CredentialRequest,
        store: &dyn Fido2CredentialStore,
    ) -> Result<PublicKeyCredentialAuthenticatorAttestationResponse, SdkError>;

    async fn authenticate_fido2_credential(
        &self,
        request: AuthenticateFido2CredentialRequest,
        store: &dyn Fido2CredentialStore,
    ) -> Result<PublicKeyCredentialAuthenticatorAssertionResponse, SdkError>;

    async fn decrypt_fido2_credential_autofill_views(
        &self,
        user_id: &str,
        cipher_views: &[CipherView],
    ) -> Result<Vec<Fido2CredentialAutofillView>, SdkError>;
}
