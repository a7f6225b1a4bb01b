//! Identity of the application asking for a credential.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::encoding::{b64url, colon_hex, serde_b64_vec};

const APK_KEY_HASH_PREFIX: &str = "android:apk-key-hash:";
const ANDROID_APP_SCHEME: &str = "androidapp://";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingAppInfo {
    pub package_name: String,
    /// DER encoded signing certificates, current signer first.
    #[serde(default, with = "serde_b64_vec")]
    pub signing_certificates: Vec<Vec<u8>>,
    /// Origin declared by a privileged caller (a browser acting for a web page).
    #[serde(default)]
    pub origin: Option<String>,
}

impl CallingAppInfo {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            signing_certificates: Vec::new(),
            origin: None,
        }
    }

    #[must_use]
    pub fn with_certificate(mut self, der: impl Into<Vec<u8>>) -> Self {
        self.signing_certificates.push(der.into());
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// A caller is privileged iff it declared a non-empty origin.
    pub fn is_origin_populated(&self) -> bool {
        self.origin.as_deref().is_some_and(|o| !o.is_empty())
    }

    /// SHA-256 of the signing certificate. `None` when the caller has no
    /// certificate or is signed by more than one signer.
    pub fn signing_fingerprint(&self) -> Option<[u8; 32]> {
        match self.signing_certificates.as_slice() {
            [cert] => Some(Sha256::digest(cert).into()),
            _ => None,
        }
    }

    pub fn signing_fingerprint_hex(&self) -> Option<String> {
        self.signing_fingerprint().map(|fp| colon_hex(&fp))
    }

    /// `android:apk-key-hash:<base64url(sha256(cert))>` for the first signer.
    pub fn app_origin(&self) -> Option<String> {
        let cert = self.signing_certificates.first()?;
        Some(format!("{APK_KEY_HASH_PREFIX}{}", b64url(&Sha256::digest(cert))))
    }

    /// URI used to match vault logins saved for this app.
    pub fn android_app_uri(&self) -> String {
        format!("{ANDROID_APP_SCHEME}{}", self.package_name)
    }
}
