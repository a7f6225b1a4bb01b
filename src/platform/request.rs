use serde::{Deserialize, Serialize};

use crate::caller::CallingAppInfo;
use crate::encoding::serde_b64url_opt;

/// Passkey registration request handed over by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicKeyCredentialRequest {
    /// `PublicKeyCredentialCreationOptions` JSON.
    pub request_json: String,
    #[serde(default, with = "serde_b64url_opt", skip_serializing_if = "Option::is_none")]
    pub client_data_hash: Option<Vec<u8>>,
    /// Web origin forwarded by a privileged caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl CreatePublicKeyCredentialRequest {
    pub fn new(request_json: impl Into<String>) -> Self {
        Self {
            request_json: request_json.into(),
            client_data_hash: None,
            origin: None,
        }
    }
}

/// Passkey option of a get-credential request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPublicKeyCredentialOption {
    /// `PublicKeyCredentialRequestOptions` JSON.
    pub request_json: String,
    #[serde(default, with = "serde_b64url_opt", skip_serializing_if = "Option::is_none")]
    pub client_data_hash: Option<Vec<u8>>,
}

impl GetPublicKeyCredentialOption {
    pub fn new(request_json: impl Into<String>) -> Self {
        Self {
            request_json: request_json.into(),
            client_data_hash: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPasswordOption {
    #[serde(default)]
    pub allowed_user_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialOption {
    PublicKey(GetPublicKeyCredentialOption),
    Password(GetPasswordOption),
}

/// Final get-credential request, sent once the user picked an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderGetCredentialRequest {
    pub credential_options: Vec<CredentialOption>,
    pub calling_app_info: CallingAppInfo,
}

impl ProviderGetCredentialRequest {
    pub fn first_public_key_option(&self) -> Option<&GetPublicKeyCredentialOption> {
        self.credential_options.iter().find_map(|o| match o {
            CredentialOption::PublicKey(pk) => Some(pk),
            CredentialOption::Password(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginGetPasswordOption {
    pub id: String,
    #[serde(default)]
    pub allowed_user_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginGetPublicKeyCredentialOption {
    pub id: String,
    pub request_json: String,
    #[serde(default, with = "serde_b64url_opt", skip_serializing_if = "Option::is_none")]
    pub client_data_hash: Option<Vec<u8>>,
}

/// Listing request: which entries to offer in the system credential picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCredentialsRequest {
    pub user_id: String,
    #[serde(default)]
    pub calling_app_info: Option<CallingAppInfo>,
    #[serde(default)]
    pub begin_get_password_options: Vec<BeginGetPasswordOption>,
    #[serde(default)]
    pub begin_get_public_key_credential_options: Vec<BeginGetPublicKeyCredentialOption>,
}

/// Every inbound request the router handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialRequest {
    #[serde(rename_all = "camelCase")]
    RegisterPublicKey {
        user_id: String,
        calling_app_info: CallingAppInfo,
        request: CreatePublicKeyCredentialRequest,
        selected_cipher_id: String,
    },
    #[serde(rename_all = "camelCase")]
    AuthenticatePublicKey {
        user_id: String,
        calling_app_info: CallingAppInfo,
        option: GetPublicKeyCredentialOption,
        selected_cipher_id: String,
        #[serde(default)]
        origin: Option<String>,
    },
    GetCredentials(GetCredentialsRequest),
}
