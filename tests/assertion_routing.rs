mod common;

use std::sync::Arc;

use common::*;
use credroute::CeremonyError;
use credroute::credentials::{CredentialResponse, Fido2PublicKeyCredential};
use credroute::encoding::b64url;
use credroute::options::UserVerificationRequirement;
use credroute::origin::{ClientData, TrustOrigin};
use credroute::platform::{
    CreatePublicKeyCredentialRequest, CredentialRequest, GetPublicKeyCredentialOption,
};
use credroute::vault::{CipherView, SnapshotVault};
use sha2::{Digest, Sha256};

fn sdk_ok() -> Arc<MockSdk> {
    Arc::new(MockSdk {
        assertion: Some(assertion_response()),
        ..Default::default()
    })
}

fn selected() -> CipherView {
    passkey_cipher("c1", "b64.AQID", "example.com")
}

fn vault() -> Arc<SnapshotVault> {
    Arc::new(SnapshotVault::from_ciphers(vec![selected()]))
}

fn get() -> GetPublicKeyCredentialOption {
    GetPublicKeyCredentialOption::new(GET_JSON)
}

#[tokio::test]
async fn test_explicit_origin_and_client_data_hash() {
    let sdk = sdk_ok();
    let manager = manager(sdk.clone(), vault());
    let mut option = GetPublicKeyCredentialOption::new(GET_JSON);
    option.client_data_hash = Some(vec![7; 32]);

    let result = manager
        .authenticate_credential(
            "user-1",
            &caller(),
            &option,
            selected(),
            Some("https://login.example.com"),
        )
        .await;
    assert!(result.is_ok());

    let recorded = sdk.assertions.lock().unwrap()[0].clone();
    assert_eq!(recorded.origin, TrustOrigin::Web("https://login.example.com".into()));
    assert_eq!(
        recorded.client_data,
        ClientData::DefaultWithCustomHash { hash: vec![7; 32] }
    );
    assert!(recorded.is_user_verification_supported);
    let wrapped: serde_json::Value = serde_json::from_str(&recorded.request_json).unwrap();
    assert_eq!(wrapped["publicKey"]["rpId"], "example.com");
}

#[tokio::test]
async fn test_rp_id_origin_with_app_origin_client_data() {
    let sdk = sdk_ok();
    let manager = manager(sdk.clone(), vault());

    manager
        .authenticate_credential("user-1", &caller(), &get(), selected(), None)
        .await
        .unwrap();

    let recorded = sdk.assertions.lock().unwrap()[0].clone();
    let TrustOrigin::Android(link) = recorded.origin else {
        panic!("expected asset link origin");
    };
    assert_eq!(link.package_name, PACKAGE);
    assert_eq!(link.host, "https://example.com");
    assert_eq!(link.asset_link_url.as_deref(), Some("https://example.com"));
    assert_eq!(
        recorded.client_data,
        ClientData::DefaultWithExtraData {
            android_package_name: format!("android:apk-key-hash:{}", b64url(&Sha256::digest(CERT))),
        }
    );
}

#[tokio::test]
async fn test_empty_origin_falls_back_to_rp_id() {
    let sdk = sdk_ok();
    let manager = manager(sdk.clone(), vault());

    manager
        .authenticate_credential("user-1", &caller(), &get(), selected(), Some(""))
        .await
        .unwrap();
    let recorded = sdk.assertions.lock().unwrap()[0].clone();
    assert!(matches!(recorded.origin, TrustOrigin::Android(_)));
}

#[tokio::test]
async fn test_missing_rp_id_without_origin() {
    let sdk = sdk_ok();
    let manager = manager(sdk.clone(), vault());
    let option = GetPublicKeyCredentialOption::new(r#"{"challenge":"c"}"#);

    let result = manager
        .authenticate_credential("user-1", &caller(), &option, selected(), None)
        .await;
    assert_eq!(result, Err(CeremonyError::MissingHostUrl));
    assert_eq!(sdk.assertion_count(), 0);
}

#[tokio::test]
async fn test_sdk_failure_is_internal_error() {
    let sdk = Arc::new(MockSdk::default());
    let manager = manager(sdk.clone(), vault());

    let result = manager
        .authenticate_credential("user-1", &caller(), &get(), selected(), None)
        .await;
    assert_eq!(result, Err(CeremonyError::InternalError));
}

#[tokio::test]
async fn test_assertion_response_serialization_is_lossless() {
    let manager = manager(sdk_ok(), vault());

    let json = manager
        .authenticate_credential("user-1", &caller(), &get(), selected(), None)
        .await
        .unwrap();

    let parsed: Fido2PublicKeyCredential = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Fido2PublicKeyCredential::from(&assertion_response()));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["id"], "AQID");
    assert_eq!(value["response"]["signature"], "MEU");
    assert_eq!(value["response"]["userHandle"], "dXNlcg");
    assert_eq!(value["clientExtensionResults"], serde_json::json!({}));
}

#[tokio::test]
async fn test_sdk_store_callbacks_reach_held_store() {
    let sdk = Arc::new(MockSdk {
        assertion: Some(assertion_response()),
        query_store: true,
        ..Default::default()
    });
    let store = Arc::new(RecordingStore::default());
    let manager = manager_with_store(sdk, vault(), store.clone());

    manager
        .authenticate_credential("user-1", &caller(), &get(), selected(), None)
        .await
        .unwrap();
    assert_eq!(*store.calls.lock().unwrap(), vec!["all_credentials"]);
}

#[tokio::test]
async fn test_route_passes_origin() {
    let sdk = sdk_ok();
    let manager = manager(sdk.clone(), vault());

    let response = manager
        .route(CredentialRequest::AuthenticatePublicKey {
            user_id: "user-1".into(),
            calling_app_info: caller(),
            option: get(),
            selected_cipher_id: "c1".into(),
            origin: Some("https://example.com".into()),
        })
        .await;
    let CredentialResponse::Authenticated(result) = response else {
        panic!("expected authentication response");
    };
    assert!(result.is_ok());
    assert_eq!(
        sdk.assertions.lock().unwrap()[0].origin,
        TrustOrigin::Web("https://example.com".into())
    );
}

#[test]
fn test_authentication_attempts_are_bounded() {
    let manager = manager(sdk_ok(), vault());
    for _ in 0..5 {
        assert!(manager.has_authentication_attempts_remaining());
        manager.session().record_authentication_attempt();
    }
    assert!(!manager.has_authentication_attempts_remaining());
}

#[test]
fn test_verification_requirement_resolution() {
    let manager = manager(sdk_ok(), vault());
    let fallback = UserVerificationRequirement::Preferred;

    let assertion = CredentialRequest::AuthenticatePublicKey {
        user_id: "user-1".into(),
        calling_app_info: caller(),
        option: get(),
        selected_cipher_id: "c1".into(),
        origin: None,
    };
    assert_eq!(
        manager.resolve_verification_requirement(&assertion, fallback),
        UserVerificationRequirement::Discouraged
    );

    let create = CreatePublicKeyCredentialRequest::new(CREATE_JSON);
    assert_eq!(
        manager.resolve_verification_requirement(&create, fallback),
        UserVerificationRequirement::Required
    );

    let garbage = GetPublicKeyCredentialOption::new("{");
    assert_eq!(manager.resolve_verification_requirement(&garbage, fallback), fallback);
}
