use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Fields of a cipher the UI may copy without a reprompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyableCipherFields {
    LoginUsername,
    LoginPassword,
    LoginTotp,
}

/// How a login URI is compared, stored as its numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum UriMatchType {
    #[default]
    Domain = 0,
    Host = 1,
    StartsWith = 2,
    Exact = 3,
    RegularExpression = 4,
    Never = 5,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUriView {
    pub uri: String,
    #[serde(default, rename = "match")]
    pub match_type: Option<UriMatchType>,
}

/// Listing projection of a stored passkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fido2CredentialListView {
    pub credential_id: String,
    pub rp_id: String,
    #[serde(default)]
    pub user_handle: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginListView {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub uris: Vec<LoginUriView>,
    #[serde(default)]
    pub fido2_credentials: Vec<Fido2CredentialListView>,
}

/// Decrypted listing view of a vault item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherListView {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub login: Option<LoginListView>,
    #[serde(default)]
    pub copyable_fields: Vec<CopyableCipherFields>,
    #[serde(default)]
    pub deleted_date: Option<DateTime<Utc>>,
}

impl CipherListView {
    pub fn is_deleted(&self) -> bool {
        self.deleted_date.is_some()
    }

    pub fn is_active_with_fido2_credentials(&self) -> bool {
        !self.is_deleted()
            && self
                .login
                .as_ref()
                .is_some_and(|l| !l.fido2_credentials.is_empty())
    }

    pub fn is_active_with_copyable_password(&self) -> bool {
        !self.is_deleted() && self.copyable_fields.contains(&CopyableCipherFields::LoginPassword)
    }

    pub fn has_fido2_credential_for(&self, rp_ids: &[String]) -> bool {
        self.login
            .as_ref()
            .is_some_and(|l| l.fido2_credentials.iter().any(|c| rp_ids.contains(&c.rp_id)))
    }
}

/// Fully decrypted passkey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fido2CredentialView {
    /// UUID, or `b64.` followed by base64url bytes.
    pub credential_id: String,
    #[serde(default = "default_key_type")]
    pub key_type: String,
    #[serde(default = "default_key_algorithm")]
    pub key_algorithm: String,
    #[serde(default = "default_key_curve")]
    pub key_curve: String,
    /// Private key material; opaque to this crate.
    pub key_value: String,
    pub rp_id: String,
    #[serde(default)]
    pub user_handle: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub counter: String,
    #[serde(default)]
    pub rp_name: Option<String>,
    #[serde(default)]
    pub user_display_name: Option<String>,
    #[serde(default)]
    pub discoverable: String,
    pub creation_date: DateTime<Utc>,
}

fn default_key_type() -> String {
    "public-key".to_string()
}

fn default_key_algorithm() -> String {
    "ECDSA".to_string()
}

fn default_key_curve() -> String {
    "P-256".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub totp: Option<String>,
    #[serde(default)]
    pub uris: Vec<LoginUriView>,
    #[serde(default)]
    pub fido2_credentials: Vec<Fido2CredentialView>,
}

/// Fully decrypted vault item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherView {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub login: Option<LoginView>,
    #[serde(default)]
    pub deleted_date: Option<DateTime<Utc>>,
}

impl CipherView {
    /// Listing projection, the same shape the vault publishes for its index.
    pub fn to_list_view(&self) -> CipherListView {
        let login = self.login.as_ref();
        let mut copyable_fields = Vec::new();
        if let Some(login) = login {
            if login.username.as_deref().is_some_and(|u| !u.is_empty()) {
                copyable_fields.push(CopyableCipherFields::LoginUsername);
            }
            if login.password.as_deref().is_some_and(|p| !p.is_empty()) {
                copyable_fields.push(CopyableCipherFields::LoginPassword);
            }
            if login.totp.is_some() {
                copyable_fields.push(CopyableCipherFields::LoginTotp);
            }
        }

        CipherListView {
            id: self.id.clone(),
            name: self.name.clone(),
            subtitle: login.and_then(|l| l.username.clone()).unwrap_or_default(),
            login: login.map(|l| LoginListView {
                username: l.username.clone(),
                uris: l.uris.clone(),
                fido2_credentials: l
                    .fido2_credentials
                    .iter()
                    .map(|c| Fido2CredentialListView {
                        credential_id: c.credential_id.clone(),
                        rp_id: c.rp_id.clone(),
                        user_handle: c.user_handle.clone(),
                        user_name: c.user_name.clone(),
                        user_display_name: c.user_display_name.clone(),
                    })
                    .collect(),
            }),
            copyable_fields,
            deleted_date: self.deleted_date,
        }
    }
}

/// Passkey as shown in autofill, derived from a decrypted cipher by the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fido2CredentialAutofillView {
    #[serde(with = "crate::encoding::serde_b64url")]
    pub credential_id: Vec<u8>,
    pub cipher_id: String,
    pub rp_id: String,
    pub user_name_for_ui: Option<String>,
    #[serde(with = "crate::encoding::serde_b64url")]
    pub user_handle: Vec<u8>,
    pub has_counter: bool,
}
