use super::register::wrap_public_key;
use super::response::Fido2PublicKeyCredential;
use super::{CeremonyError, CeremonyResult, CredentialManager};
use crate::caller::CallingAppInfo;
use crate::origin::assertion_trust;
use crate::platform::GetPublicKeyCredentialOption;
use crate::sdk::AuthenticateFido2CredentialRequest;
use crate::vault::CipherView;

impl CredentialManager {
    /// Produce an assertion with the passkey stored in `selected_cipher`.
    ///
    /// A non-empty `origin` is trusted as the web origin; otherwise the
    /// relying party id of the request decides.
    pub async fn authenticate_credential(
        &self,
        user_id: &str,
        caller: &CallingAppInfo,
        option: &GetPublicKeyCredentialOption,
        selected_cipher: CipherView,
        origin: Option<&str>,
    ) -> CeremonyResult {
        let (trust, client_data) = assertion_trust(caller, option, origin).map_err(|e| {
            tracing::warn!(package = %caller.package_name, error = %e, "Assertion rejected");
            CeremonyError::from(e)
        })?;
        tracing::debug!(package = %caller.package_name, origin = ?trust, "Authenticating passkey");

        let sdk_request = AuthenticateFido2CredentialRequest {
            user_id: user_id.to_string(),
            origin: trust,
            request_json: wrap_public_key(&option.request_json),
            client_data,
            selected_cipher_view: selected_cipher,
            is_user_verification_supported: true,
        };

        let response = self
            .sdk
            .authenticate_fido2_credential(sdk_request, self)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to authenticate FIDO2 credential");
                CeremonyError::InternalError
            })?;

        serde_json::to_string(&Fido2PublicKeyCredential::from(&response)).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize assertion response");
            CeremonyError::InternalError
        })
    }
}
