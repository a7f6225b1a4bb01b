use serde::{Deserialize, Serialize};

/// An entry offered to the system credential picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialEntry {
    Password(PasswordCredentialEntry),
    PublicKey(PublicKeyCredentialEntry),
}

impl CredentialEntry {
    pub fn cipher_id(&self) -> &str {
        match self {
            Self::Password(e) => &e.cipher_id,
            Self::PublicKey(e) => &e.cipher_id,
        }
    }

    pub fn is_password(&self) -> bool {
        matches!(self, Self::Password(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredentialEntry {
    pub user_id: String,
    pub cipher_id: String,
    pub option_id: String,
    pub username: String,
    pub display_name: String,
    /// The picker must verify the user before releasing the credential.
    pub biometric_prompt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialEntry {
    pub user_id: String,
    pub cipher_id: String,
    pub option_id: String,
    /// base64url credential id.
    pub credential_id: String,
    pub rp_id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub biometric_prompt: bool,
}
