use crate::encoding::b64url;
use crate::options::{PasskeyAssertionOptions, decode_or_none};
use crate::platform::{
    BeginGetPasswordOption, BeginGetPublicKeyCredentialOption, CredentialEntry,
    PasswordCredentialEntry, PublicKeyCredentialEntry,
};
use crate::vault::{CipherListView, Fido2CredentialAutofillView};

const NO_USERNAME: &str = "No username";

/// Turns vault data into picker entries, one per option and credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialEntryBuilder;

impl CredentialEntryBuilder {
    pub fn build_password_credential_entries(
        &self,
        user_id: &str,
        ciphers: &[CipherListView],
        options: &[BeginGetPasswordOption],
        is_user_verified: bool,
    ) -> Vec<CredentialEntry> {
        let mut entries = Vec::new();
        for option in options {
            for cipher in ciphers.iter().filter(|c| c.is_active_with_copyable_password()) {
                let Some(cipher_id) = cipher.id.as_deref() else {
                    continue;
                };
                let username = cipher
                    .login
                    .as_ref()
                    .and_then(|l| l.username.clone())
                    .unwrap_or_default();
                if !option.allowed_user_ids.is_empty()
                    && !option.allowed_user_ids.contains(&username)
                {
                    continue;
                }
                entries.push(CredentialEntry::Password(PasswordCredentialEntry {
                    user_id: user_id.to_string(),
                    cipher_id: cipher_id.to_string(),
                    option_id: option.id.clone(),
                    username,
                    display_name: cipher.name.clone(),
                    biometric_prompt: !is_user_verified,
                }));
            }
        }
        entries
    }

    pub fn build_public_key_credential_entries(
        &self,
        user_id: &str,
        views: &[Fido2CredentialAutofillView],
        options: &[BeginGetPublicKeyCredentialOption],
        is_user_verified: bool,
    ) -> Vec<CredentialEntry> {
        let mut entries = Vec::new();
        for option in options {
            let Some(rp_id) = decode_or_none::<PasskeyAssertionOptions>(&option.request_json)
                .and_then(|o| o.relying_party_id)
            else {
                tracing::debug!(option = %option.id, "Option carries no relying party id");
                continue;
            };
            for view in views.iter().filter(|v| v.rp_id == rp_id) {
                entries.push(CredentialEntry::PublicKey(PublicKeyCredentialEntry {
                    user_id: user_id.to_string(),
                    cipher_id: view.cipher_id.clone(),
                    option_id: option.id.clone(),
                    credential_id: b64url(&view.credential_id),
                    rp_id: view.rp_id.clone(),
                    username: view
                        .user_name_for_ui
                        .clone()
                        .unwrap_or_else(|| NO_USERNAME.to_string()),
                    display_name: view.user_name_for_ui.clone(),
                    biometric_prompt: !is_user_verified,
                }));
            }
        }
        entries
    }
}
