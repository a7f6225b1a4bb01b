use serde::{Deserialize, Serialize};

use super::{PublicKeyCredentialDescriptor, UserVerificationRequirement};

/// `PublicKeyCredentialCreationOptions` in its JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasskeyAttestationOptions {
    pub challenge: String,
    #[serde(rename = "rp")]
    pub relying_party: PublicKeyCredentialRpEntity,
    pub user: PublicKeyCredentialUserEntity,
    #[serde(default)]
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub exclude_credentials: Vec<PublicKeyCredentialDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyCredentialRpEntity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialUserEntity {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyCredentialParameters {
    #[serde(rename = "type")]
    pub ty: String,
    pub alg: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelectionCriteria {
    #[serde(default)]
    pub authenticator_attachment: Option<String>,
    #[serde(default)]
    pub resident_key: Option<String>,
    #[serde(default)]
    pub require_resident_key: Option<bool>,
    #[serde(default)]
    pub user_verification: Option<UserVerificationRequirement>,
}

impl PasskeyAttestationOptions {
    pub fn relying_party_id(&self) -> Option<&str> {
        self.relying_party.id.as_deref()
    }

    pub fn user_verification(&self) -> Option<UserVerificationRequirement> {
        self.authenticator_selection
            .as_ref()
            .and_then(|s| s.user_verification)
    }
}
