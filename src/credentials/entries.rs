use super::{CredentialManager, ListingError};
use crate::options::{PasskeyAssertionOptions, decode_or_none};
use crate::platform::{
    BeginGetPasswordOption, BeginGetPublicKeyCredentialOption, CredentialEntry,
    GetCredentialsRequest,
};
use crate::vault::{CipherListView, CipherLookupError, loaded_cipher_list};

impl CredentialManager {
    /// Entries to show in the system credential picker.
    ///
    /// Passwords and passkeys are looked up independently. When the passkey
    /// lookup fails but passwords were found, the passwords are returned on
    /// their own.
    pub async fn list_credential_entries(
        &self,
        request: &GetCredentialsRequest,
    ) -> Result<Vec<CredentialEntry>, ListingError> {
        let ciphers: Vec<CipherListView> =
            loaded_cipher_list(self.vault.decrypt_cipher_list_state())
                .await
                .into_iter()
                .filter(|c| {
                    c.is_active_with_fido2_credentials() || c.is_active_with_copyable_password()
                })
                .collect();
        if ciphers.is_empty() {
            tracing::debug!("No active ciphers with passkeys or passwords");
            return Ok(Vec::new());
        }

        let password_entries = match &request.calling_app_info {
            Some(caller) => self.password_entries(
                &request.user_id,
                &request.begin_get_password_options,
                &self
                    .matcher
                    .filter_ciphers_for_matches(&ciphers, &caller.android_app_uri()),
            ),
            None => Vec::new(),
        };

        let passkey_ciphers: Vec<CipherListView> = ciphers
            .into_iter()
            .filter(|c| c.is_active_with_fido2_credentials())
            .collect();
        let passkey_entries = self
            .public_key_entries(
                &request.user_id,
                &request.begin_get_public_key_credential_options,
                &passkey_ciphers,
            )
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "Failed to get FIDO 2 credential entries")
            });

        tracing::debug!(
            passwords = password_entries.len(),
            passkeys = passkey_entries.as_ref().map_or(0, Vec::len),
            "Credential entries built"
        );

        match passkey_entries {
            Err(_) if !password_entries.is_empty() => Ok(password_entries),
            Err(e) => Err(e),
            Ok(mut entries) => {
                entries.extend(password_entries);
                Ok(entries)
            }
        }
    }

    fn password_entries(
        &self,
        user_id: &str,
        options: &[BeginGetPasswordOption],
        matched: &[CipherListView],
    ) -> Vec<CredentialEntry> {
        if options.is_empty() {
            return Vec::new();
        }
        self.entry_builder.build_password_credential_entries(
            user_id,
            matched,
            options,
            self.is_user_verified(),
        )
    }

    async fn public_key_entries(
        &self,
        user_id: &str,
        options: &[BeginGetPublicKeyCredentialOption],
        ciphers: &[CipherListView],
    ) -> Result<Vec<CredentialEntry>, ListingError> {
        if options.is_empty() {
            return Ok(Vec::new());
        }

        let mut rp_ids: Vec<String> = Vec::new();
        for rp_id in options
            .iter()
            .filter_map(|o| decode_or_none::<PasskeyAssertionOptions>(&o.request_json))
            .filter_map(|o| o.relying_party_id)
        {
            if !rp_ids.contains(&rp_id) {
                rp_ids.push(rp_id);
            }
        }
        if rp_ids.is_empty() {
            return Err(ListingError::MissingRelyingPartyId);
        }

        let mut cipher_views = Vec::new();
        for cipher in ciphers.iter().filter(|c| c.has_fido2_credential_for(&rp_ids)) {
            let cipher_id = cipher.id.as_deref().unwrap_or_default();
            match self.vault.get_cipher(cipher_id).await {
                Ok(view) => cipher_views.push(view),
                Err(CipherLookupError::NotFound) => {
                    tracing::error!(
                        cipher_id,
                        "Cipher not found while building public key credential entries"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        cipher_id,
                        error = %e,
                        "Failed to decrypt cipher while building credential entries"
                    );
                }
            }
        }
        if cipher_views.is_empty() {
            return Ok(Vec::new());
        }

        let views = self
            .sdk
            .decrypt_fido2_credential_autofill_views(user_id, &cipher_views)
            .await
            .map_err(ListingError::Decrypt)?;

        Ok(self.entry_builder.build_public_key_credential_entries(
            user_id,
            &views,
            options,
            self.is_user_verified(),
        ))
    }
}
