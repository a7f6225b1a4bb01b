use crate::origin::{ClientData, TrustOrigin};
use crate::vault::{CipherView, Fido2CredentialView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFido2CredentialRequest {
    pub user_id: String,
    pub origin: TrustOrigin,
    /// Options wrapped as `{"publicKey": ...}`.
    pub request_json: String,
    pub client_data: ClientData,
    pub selected_cipher_view: CipherView,
    pub is_user_verification_supported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateFido2CredentialRequest {
    pub user_id: String,
    pub origin: TrustOrigin,
    pub request_json: String,
    pub client_data: ClientData,
    pub selected_cipher_view: CipherView,
    pub is_user_verification_supported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedCredential {
    pub cipher: CipherView,
    pub credential: Fido2CredentialView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredPropsResult {
    pub rk: Option<bool>,
    pub authenticator_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientExtensionResults {
    pub cred_props: Option<CredPropsResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorAttestationResponse {
    pub client_data_json: Vec<u8>,
    pub authenticator_data: Vec<u8>,
    pub public_key: Option<Vec<u8>>,
    pub public_key_algorithm: i64,
    pub attestation_object: Vec<u8>,
    pub transports: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyCredentialAuthenticatorAttestationResponse {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub ty: String,
    pub authenticator_attachment: Option<String>,
    pub client_extension_results: ClientExtensionResults,
    pub response: AuthenticatorAttestationResponse,
    pub selected_credential: SelectedCredential,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatorAssertionResponse {
    pub client_data_json: Vec<u8>,
    pub authenticator_data: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyCredentialAuthenticatorAssertionResponse {
    pub id: String,
    pub raw_id: Vec<u8>,
    pub ty: String,
    pub authenticator_attachment: Option<String>,
    pub client_extension_results: ClientExtensionResults,
    pub response: AuthenticatorAssertionResponse,
    pub selected_credential: SelectedCredential,
}
