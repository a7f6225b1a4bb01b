//! Trust origins: what the credential SDK validates a caller against.

pub mod resolve;

pub use resolve::{assertion_trust, registration_trust};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::encoding::serde_b64url;

const HTTPS_SCHEME: &str = "https://";
const HTTP_SCHEME: &str = "http://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OriginError {
    #[error("no relying party host could be resolved")]
    MissingHostUrl,
    #[error("calling app signature is missing or ambiguous")]
    InvalidAppSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TrustOrigin {
    /// Explicit web origin, supplied by a privileged caller.
    Web(String),
    /// Native app whose asset link still has to be verified by the SDK.
    Android(UnverifiedAssetLink),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnverifiedAssetLink {
    pub package_name: String,
    pub sha256_cert_fingerprint: String,
    pub host: String,
    pub asset_link_url: Option<String>,
}

/// How the SDK builds (or skips building) `clientDataJSON`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientData {
    #[serde(rename_all = "camelCase")]
    DefaultWithExtraData { android_package_name: String },
    DefaultWithCustomHash {
        #[serde(with = "serde_b64url")]
        hash: Vec<u8>,
    },
}

/// Turn a relying party id into a URL, assuming https when no scheme is given.
/// Returns `None` unless the result parses as a URL with a host.
pub fn prefix_https_if_necessary(value: &str) -> Option<String> {
    let value = value.trim();
    // `Url::parse` silently drops tabs and newlines; reject them up front.
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let candidate = if value.starts_with(HTTPS_SCHEME) || value.starts_with(HTTP_SCHEME) {
        value.to_string()
    } else {
        format!("{HTTPS_SCHEME}{value}")
    };
    match Url::parse(&candidate) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => Some(candidate),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(value = %candidate, error = %e, "Relying party is not a valid URL");
            None
        }
    }
}
