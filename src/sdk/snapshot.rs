use super::{
    AuthenticateFido2CredentialRequest, CredentialSdk, Fido2CredentialStore,
    PublicKeyCredentialAuthenticatorAssertionResponse,
    PublicKeyCredentialAuthenticatorAttestationResponse, RegisterFido2CredentialRequest, SdkError,
};
use crate::encoding::b64url_decode;
use crate::vault::{CipherView, Fido2CredentialAutofillView, Fido2CredentialView};

const B64_CREDENTIAL_ID_PREFIX: &str = "b64.";

/// Offline SDK for ciphers that are already decrypted.
///
/// Builds autofill views directly from the vault snapshot; ceremonies need
/// key material handling and are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotSdk;

#[async_trait::async_trait]
impl CredentialSdk for SnapshotSdk {
    async fn register_fido2_credential(
        &self,
        _request: RegisterFido2CredentialRequest,
        _store: &dyn Fido2CredentialStore,
    ) -> Result<PublicKeyCredentialAuthenticatorAttestationResponse, SdkError> {
        Err(SdkError::Unsupported("passkey registration"))
    }

    async fn authenticate_fido2_credential(
        &self,
        _request: AuthenticateFido2CredentialRequest,
        _store: &dyn Fido2CredentialStore,
    ) -> Result<PublicKeyCredentialAuthenticatorAssertionResponse, SdkError> {
        Err(SdkError::Unsupported("passkey assertion"))
    }

    async fn decrypt_fido2_credential_autofill_views(
        &self,
        _user_id: &str,
        cipher_views: &[CipherView],
    ) -> Result<Vec<Fido2CredentialAutofillView>, SdkError> {
        let mut views = Vec::new();
        for cipher in cipher_views {
            let Some(cipher_id) = cipher.id.as_deref() else {
                continue;
            };
            let Some(login) = &cipher.login else {
                continue;
            };
            for credential in &login.fido2_credentials {
                views.push(autofill_view(cipher_id, cipher, credential)?);
            }
        }
        Ok(views)
    }
}

fn autofill_view(
    cipher_id: &str,
    cipher: &CipherView,
    credential: &Fido2CredentialView,
) -> Result<Fido2CredentialAutofillView, SdkError> {
    let credential_id = credential_id_bytes(&credential.credential_id)?;
    let user_handle = match credential.user_handle.as_deref() {
        Some(handle) => b64url_decode(handle)
            .map_err(|e| SdkError::Rejected(format!("invalid user handle: {e}")))?,
        None => Vec::new(),
    };
    let user_name_for_ui = credential
        .user_name
        .clone()
        .or_else(|| credential.user_display_name.clone())
        .or_else(|| cipher.login.as_ref().and_then(|l| l.username.clone()));

    Ok(Fido2CredentialAutofillView {
        credential_id,
        cipher_id: cipher_id.to_string(),
        rp_id: credential.rp_id.clone(),
        user_name_for_ui,
        user_handle,
        has_counter: credential.counter.parse::<u64>().is_ok_and(|c| c > 0),
    })
}

/// Stored ids are either a UUID or `b64.` + base64url.
pub fn credential_id_bytes(id: &str) -> Result<Vec<u8>, SdkError> {
    if let Some(encoded) = id.strip_prefix(B64_CREDENTIAL_ID_PREFIX) {
        return b64url_decode(encoded)
            .map_err(|e| SdkError::Rejected(format!("invalid credential id: {e}")));
    }
    uuid::Uuid::parse_str(id)
        .map(|u| u.as_bytes().to_vec())
        .map_err(|e| SdkError::Rejected(format!("invalid credential id: {e}")))
}
