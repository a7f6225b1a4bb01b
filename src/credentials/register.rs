use super::response::Fido2AttestationResponse;
use super::{CeremonyError, CeremonyResult, CredentialManager};
use crate::caller::CallingAppInfo;
use crate::origin::registration_trust;
use crate::platform::CreatePublicKeyCredentialRequest;
use crate::sdk::RegisterFido2CredentialRequest;
use crate::vault::CipherView;

impl CredentialManager {
    /// Register a new passkey into `selected_cipher`.
    pub async fn register_credential(
        &self,
        user_id: &str,
        caller: &CallingAppInfo,
        request: &CreatePublicKeyCredentialRequest,
        selected_cipher: CipherView,
    ) -> CeremonyResult {
        let privileged = caller.is_origin_populated();
        let (origin, client_data) = registration_trust(caller, request).map_err(|e| {
            tracing::warn!(
                package = %caller.package_name,
                privileged,
                error = %e,
                "Registration rejected"
            );
            CeremonyError::from(e)
        })?;
        tracing::debug!(package = %caller.package_name, privileged, ?origin, "Registering passkey");

        let sdk_request = RegisterFido2CredentialRequest {
            user_id: user_id.to_string(),
            origin,
            request_json: wrap_public_key(&request.request_json),
            client_data,
            selected_cipher_view: selected_cipher,
            // The caller verified the user before we got here.
            is_user_verification_supported: true,
        };

        let response = self
            .sdk
            .register_fido2_credential(sdk_request, self)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to register FIDO2 credential");
                CeremonyError::InternalError
            })?;

        serde_json::to_string(&Fido2AttestationResponse::from(&response)).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize attestation response");
            CeremonyError::InternalError
        })
    }
}

/// Nest request options under `publicKey`, the shape the SDK parses.
pub(crate) fn wrap_public_key(request_json: &str) -> String {
    format!(r#"{{"publicKey": {request_json}}}"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_public_key() {
        let wrapped = wrap_public_key(r#"{"challenge":"c"}"#);
        let value: serde_json::Value = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(value["publicKey"]["challenge"], "c");
    }
}
