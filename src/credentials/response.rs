//! JSON shapes the platform expects back from a passkey ceremony.

use serde::{Deserialize, Serialize};

use crate::encoding::b64url;
use crate::sdk::{
    ClientExtensionResults, PublicKeyCredentialAuthenticatorAssertionResponse,
    PublicKeyCredentialAuthenticatorAttestationResponse,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fido2AttestationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub raw_id: String,
    pub response: RegistrationResponse,
    pub client_extension_results: PlatformExtensionResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub attestation_object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
    pub public_key_algorithm: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    pub authenticator_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformExtensionResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred_props: Option<CredentialPropertiesResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPropertiesResult {
    #[serde(rename = "rk")]
    pub is_resident_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fido2PublicKeyCredential {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub raw_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<String>,
    pub response: AssertionResponse,
    pub client_extension_results: PlatformExtensionResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponse {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub authenticator_data: String,
    pub signature: String,
    pub user_handle: String,
}

impl From<&ClientExtensionResults> for PlatformExtensionResults {
    fn from(results: &ClientExtensionResults) -> Self {
        Self {
            cred_props: results
                .cred_props
                .as_ref()
                .and_then(|p| p.rk)
                .map(|rk| CredentialPropertiesResult { is_resident_key: rk }),
        }
    }
}

impl From<&PublicKeyCredentialAuthenticatorAttestationResponse> for Fido2AttestationResponse {
    fn from(r: &PublicKeyCredentialAuthenticatorAttestationResponse) -> Self {
        Self {
            id: r.id.clone(),
            ty: r.ty.clone(),
            raw_id: b64url(&r.raw_id),
            response: RegistrationResponse {
                client_data_json: b64url(&r.response.client_data_json),
                attestation_object: b64url(&r.response.attestation_object),
                transports: r.response.transports.clone(),
                public_key_algorithm: r.response.public_key_algorithm,
                public_key: r.response.public_key.as_deref().map(b64url),
                authenticator_data: b64url(&r.response.authenticator_data),
            },
            client_extension_results: (&r.client_extension_results).into(),
            authenticator_attachment: r.authenticator_attachment.clone(),
        }
    }
}

impl From<&PublicKeyCredentialAuthenticatorAssertionResponse> for Fido2PublicKeyCredential {
    fn from(r: &PublicKeyCredentialAuthenticatorAssertionResponse) -> Self {
        Self {
            id: r.id.clone(),
            ty: r.ty.clone(),
            raw_id: b64url(&r.raw_id),
            authenticator_attachment: r.authenticator_attachment.clone(),
            response: AssertionResponse {
                client_data_json: b64url(&r.response.client_data_json),
                authenticator_data: b64url(&r.response.authenticator_data),
                signature: b64url(&r.response.signature),
                user_handle: b64url(&r.response.user_handle),
            },
            client_extension_results: (&r.client_extension_results).into(),
        }
    }
}
