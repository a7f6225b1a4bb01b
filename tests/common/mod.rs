#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use credroute::caller::CallingAppInfo;
use credroute::credentials::CredentialManager;
use credroute::sdk::{
    AuthenticateFido2CredentialRequest, AuthenticatorAssertionResponse,
    AuthenticatorAttestationResponse, ClientExtensionResults, CredPropsResult, CredentialSdk,
    Fido2CallbackError, Fido2CredentialStore, PublicKeyCredentialAuthenticatorAssertionResponse,
    PublicKeyCredentialAuthenticatorAttestationResponse, RegisterFido2CredentialRequest, SdkError,
    SelectedCredential,
};
use credroute::vault::{
    CipherListView, CipherView, Fido2CredentialAutofillView, Fido2CredentialView, LoginUriView,
    LoginView, SnapshotVault, UriCipherMatcher,
};

pub const PACKAGE: &str = "com.example.app";
pub const CERT: &[u8] = b"example signing certificate";
pub const CREATE_JSON: &str = concat!(
    r#"{"challenge":"Y2hhbGxlbmdl","#,
    r#""rp":{"id":"example.com","name":"Example"},"#,
    r#""user":{"id":"dXNlcg","name":"alice"},"#,
    r#""authenticatorSelection":{"userVerification":"required"}}"#,
);
pub const GET_JSON: &str =
    r#"{"challenge":"Y2hhbGxlbmdl","rpId":"example.com","userVerification":"discouraged"}"#;

pub fn caller() -> CallingAppInfo {
    CallingAppInfo::new(PACKAGE).with_certificate(CERT.to_vec())
}

pub fn credential(
    credential_id: &str,
    rp_id: &str,
    user_name: Option<&str>,
) -> Fido2CredentialView {
    serde_json::from_value(serde_json::json!({
        "credentialId": credential_id,
        "keyValue": "a2V5",
        "rpId": rp_id,
        "userHandle": "dXNlcg",
        "userName": user_name,
        "counter": "0",
        "discoverable": "true",
        "creationDate": "2024-01-01T00:00:00Z",
    }))
    .unwrap()
}

pub fn passkey_cipher(id: &str, credential_id: &str, rp_id: &str) -> CipherView {
    CipherView {
        id: Some(id.into()),
        name: format!("{id} name"),
        login: Some(LoginView {
            username: Some("alice".into()),
            fido2_credentials: vec![credential(credential_id, rp_id, Some("alice"))],
            ..Default::default()
        }),
        deleted_date: None,
    }
}

pub fn password_cipher(id: &str, uri: &str) -> CipherView {
    CipherView {
        id: Some(id.into()),
        name: format!("{id} name"),
        login: Some(LoginView {
            username: Some("bob".into()),
            password: Some("hunter2".into()),
            uris: vec![LoginUriView {
                uri: uri.into(),
                match_type: None,
            }],
            ..Default::default()
        }),
        deleted_date: None,
    }
}

pub fn attestation_response(
    cipher: CipherView,
) -> PublicKeyCredentialAuthenticatorAttestationResponse {
    PublicKeyCredentialAuthenticatorAttestationResponse {
        id: "AQID".into(),
        raw_id: vec![1, 2, 3],
        ty: "public-key".into(),
        authenticator_attachment: Some("platform".into()),
        client_extension_results: ClientExtensionResults {
            cred_props: Some(CredPropsResult {
                rk: Some(true),
                authenticator_display_name: None,
            }),
        },
        response: AuthenticatorAttestationResponse {
            client_data_json: b"{}".to_vec(),
            authenticator_data: vec![0xaa; 37],
            public_key: Some(vec![0x04; 65]),
            public_key_algorithm: -7,
            attestation_object: vec![0xa3, 0x01],
            transports: Some(vec!["internal".into()]),
        },
        selected_credential: SelectedCredential {
            cipher,
            credential: credential("b64.AQID", "example.com", Some("alice")),
        },
    }
}

pub fn assertion_response() -> PublicKeyCredentialAuthenticatorAssertionResponse {
    PublicKeyCredentialAuthenticatorAssertionResponse {
        id: "AQID".into(),
        raw_id: vec![1, 2, 3],
        ty: "public-key".into(),
        authenticator_attachment: Some("platform".into()),
        client_extension_results: ClientExtensionResults::default(),
        response: AuthenticatorAssertionResponse {
            client_data_json: b"{}".to_vec(),
            authenticator_data: vec![0xbb; 37],
            signature: vec![0x30, 0x45],
            user_handle: b"user".to_vec(),
        },
        selected_credential: SelectedCredential {
            cipher: passkey_cipher("c1", "b64.AQID", "example.com"),
            credential: credential("b64.AQID", "example.com", Some("alice")),
        },
    }
}

/// SDK double that records every request and answers from canned results.
#[derive(Default)]
pub struct MockSdk {
    pub registrations: Mutex<Vec<RegisterFido2CredentialRequest>>,
    pub assertions: Mutex<Vec<AuthenticateFido2CredentialRequest>>,
    pub decrypted: Mutex<Vec<Vec<CipherView>>>,
    pub attestation: Option<PublicKeyCredentialAuthenticatorAttestationResponse>,
    pub assertion: Option<PublicKeyCredentialAuthenticatorAssertionResponse>,
    pub autofill: Option<Vec<Fido2CredentialAutofillView>>,
    /// Look up credentials through the store during a ceremony.
    pub query_store: bool,
}

impl MockSdk {
    pub fn registration_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }

    pub fn assertion_count(&self) -> usize {
        self.assertions.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CredentialSdk for MockSdk {
    async fn register_fido2_credential(
        &self,
        request: RegisterFido2CredentialRequest,
        store: &dyn Fido2CredentialStore,
    ) -> Result<PublicKeyCredentialAuthenticatorAttestationResponse, SdkError> {
        self.registrations.lock().unwrap().push(request.clone());
        if self.query_store {
            store.find_credentials(None, "example.com".into()).await?;
            store.save_credential(request.selected_cipher_view).await?;
        }
        self.attestation
            .clone()
            .ok_or_else(|| SdkError::Rejected("registration failed".into()))
    }

    async fn authenticate_fido2_credential(
        &self,
        request: AuthenticateFido2CredentialRequest,
        store: &dyn Fido2CredentialStore,
    ) -> Result<PublicKeyCredentialAuthenticatorAssertionResponse, SdkError> {
        self.assertions.lock().unwrap().push(request);
        if self.query_store {
            store.all_credentials().await?;
        }
        self.assertion
            .clone()
            .ok_or_else(|| SdkError::Rejected("assertion failed".into()))
    }

    async fn decrypt_fido2_credential_autofill_views(
        &self,
        _user_id: &str,
        cipher_views: &[CipherView],
    ) -> Result<Vec<Fido2CredentialAutofillView>, SdkError> {
        self.decrypted.lock().unwrap().push(cipher_views.to_vec());
        self.autofill
            .clone()
            .ok_or_else(|| SdkError::Rejected("decryption failed".into()))
    }
}

/// Credential store that only counts calls.
#[derive(Default)]
pub struct RecordingStore {
    pub calls: Mutex<Vec<&'static str>>,
}

#[async_trait::async_trait]
impl Fido2CredentialStore for RecordingStore {
    async fn find_credentials(
        &self,
        _ids: Option<Vec<Vec<u8>>>,
        _rp_id: String,
    ) -> Result<Vec<CipherView>, Fido2CallbackError> {
        self.calls.lock().unwrap().push("find_credentials");
        Ok(Vec::new())
    }

    async fn all_credentials(&self) -> Result<Vec<CipherListView>, Fido2CallbackError> {
        self.calls.lock().unwrap().push("all_credentials");
        Ok(Vec::new())
    }

    async fn save_credential(&self, _cipher: CipherView) -> Result<(), Fido2CallbackError> {
        self.calls.lock().unwrap().push("save_credential");
        Ok(())
    }
}

pub fn manager(sdk: Arc<MockSdk>, vault: Arc<SnapshotVault>) -> CredentialManager {
    manager_with_store(sdk, vault, Arc::new(RecordingStore::default()))
}

pub fn manager_with_store(
    sdk: Arc<MockSdk>,
    vault: Arc<SnapshotVault>,
    store: Arc<RecordingStore>,
) -> CredentialManager {
    CredentialManager::new(sdk, store, vault, Arc::new(UriCipherMatcher::default()))
}
