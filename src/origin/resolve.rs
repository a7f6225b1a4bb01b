use super::{ClientData, OriginError, TrustOrigin, UnverifiedAssetLink, prefix_https_if_necessary};
use crate::caller::CallingAppInfo;
use crate::options::{PasskeyAssertionOptions, PasskeyAttestationOptions, decode_or_none};
use crate::platform::{CreatePublicKeyCredentialRequest, GetPublicKeyCredentialOption};

/// Trust origin and client data for a registration ceremony.
///
/// Privileged callers (declared origin) are trusted by their web origin and
/// must present exactly one signing certificate. Everyone else is described
/// by an unverified asset link built from the relying party id.
pub fn registration_trust(
    caller: &CallingAppInfo,
    request: &CreatePublicKeyCredentialRequest,
) -> Result<(TrustOrigin, ClientData), OriginError> {
    if caller.is_origin_populated() {
        let hash = caller
            .signing_fingerprint()
            .ok_or(OriginError::InvalidAppSignature)?;
        let origin = request
            .origin
            .as_deref()
            .filter(|o| !o.is_empty())
            .ok_or(OriginError::MissingHostUrl)?;
        Ok((
            TrustOrigin::Web(origin.to_string()),
            ClientData::DefaultWithCustomHash { hash: hash.to_vec() },
        ))
    } else {
        let host = attestation_host(&request.request_json).ok_or(OriginError::MissingHostUrl)?;
        Ok((
            asset_link(caller, host),
            ClientData::DefaultWithExtraData {
                android_package_name: caller.package_name.clone(),
            },
        ))
    }
}

/// Trust origin and client data for an assertion ceremony.
///
/// A client data hash carried by the option wins over anything derived from
/// the caller. An explicit `origin` wins over the relying party id.
pub fn assertion_trust(
    caller: &CallingAppInfo,
    option: &GetPublicKeyCredentialOption,
    origin: Option<&str>,
) -> Result<(TrustOrigin, ClientData), OriginError> {
    let client_data = match &option.client_data_hash {
        Some(hash) => ClientData::DefaultWithCustomHash { hash: hash.clone() },
        None => ClientData::DefaultWithExtraData {
            android_package_name: caller
                .app_origin()
                .unwrap_or_else(|| caller.package_name.clone()),
        },
    };

    let trust = match origin.filter(|o| !o.is_empty()) {
        Some(origin) => TrustOrigin::Web(origin.to_string()),
        None => {
            let host = assertion_host(&option.request_json).ok_or(OriginError::MissingHostUrl)?;
            asset_link(caller, host)
        }
    };
    Ok((trust, client_data))
}

fn asset_link(caller: &CallingAppInfo, host: String) -> TrustOrigin {
    TrustOrigin::Android(UnverifiedAssetLink {
        package_name: caller.package_name.clone(),
        sha256_cert_fingerprint: caller.signing_fingerprint_hex().unwrap_or_default(),
        asset_link_url: Some(host.clone()),
        host,
    })
}

fn attestation_host(request_json: &str) -> Option<String> {
    decode_or_none::<PasskeyAttestationOptions>(request_json)?
        .relying_party_id()
        .and_then(prefix_https_if_necessary)
}

pub(crate) fn assertion_host(request_json: &str) -> Option<String> {
    decode_or_none::<PasskeyAssertionOptions>(request_json)?
        .relying_party_id
        .as_deref()
        .and_then(prefix_https_if_necessary)
}
