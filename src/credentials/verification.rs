use crate::options::{
    PasskeyAssertionOptions, PasskeyAttestationOptions, UserVerificationRequirement,
    decode_or_none,
};
use crate::platform::{
    CreatePublicKeyCredentialRequest, CredentialRequest, GetPublicKeyCredentialOption,
    ProviderGetCredentialRequest,
};

/// A request that may state how strongly the user must be verified.
pub trait VerificationRequirementSource {
    /// The requirement stated in the request, if it can be read.
    fn user_verification(&self) -> Option<UserVerificationRequirement>;
}

impl VerificationRequirementSource for GetPublicKeyCredentialOption {
    fn user_verification(&self) -> Option<UserVerificationRequirement> {
        decode_or_none::<PasskeyAssertionOptions>(&self.request_json)?.user_verification
    }
}

impl VerificationRequirementSource for ProviderGetCredentialRequest {
    /// Only the first public-key option is consulted.
    fn user_verification(&self) -> Option<UserVerificationRequirement> {
        self.first_public_key_option()?.user_verification()
    }
}

impl VerificationRequirementSource for CreatePublicKeyCredentialRequest {
    fn user_verification(&self) -> Option<UserVerificationRequirement> {
        decode_or_none::<PasskeyAttestationOptions>(&self.request_json)?.user_verification()
    }
}

impl VerificationRequirementSource for CredentialRequest {
    fn user_verification(&self) -> Option<UserVerificationRequirement> {
        match self {
            Self::RegisterPublicKey { request, .. } => request.user_verification(),
            Self::AuthenticatePublicKey { option, .. } => option.user_verification(),
            Self::GetCredentials(req) => req
                .begin_get_public_key_credential_options
                .first()
                .and_then(|o| decode_or_none::<PasskeyAssertionOptions>(&o.request_json))
                .and_then(|o| o.user_verification),
        }
    }
}

/// The request's own requirement, or `fallback` when it has none.
pub fn resolve_verification_requirement<R>(
    request: &R,
    fallback: UserVerificationRequirement,
) -> UserVerificationRequirement
where
    R: VerificationRequirementSource + ?Sized,
{
    request.user_verification().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caller::CallingAppInfo;
    use crate::platform::{CredentialOption, GetPasswordOption};

    fn provider_request(options: Vec<CredentialOption>) -> ProviderGetCredentialRequest {
        ProviderGetCredentialRequest {
            credential_options: options,
            calling_app_info: CallingAppInfo::new("com.example.app"),
        }
    }

    #[test]
    fn test_first_public_key_option_wins() {
        let request = provider_request(vec![
            CredentialOption::Password(GetPasswordOption::default()),
            CredentialOption::PublicKey(GetPublicKeyCredentialOption::new(
                r#"{"challenge":"c","userVerification":"discouraged"}"#,
            )),
            CredentialOption::PublicKey(GetPublicKeyCredentialOption::new(
                r#"{"challenge":"c","userVerification":"required"}"#,
            )),
        ]);
        assert_eq!(
            resolve_verification_requirement(&request, UserVerificationRequirement::Required),
            UserVerificationRequirement::Discouraged
        );
    }

    #[test]
    fn test_fallback_when_absent_or_unparseable() {
        let fallback = UserVerificationRequirement::Preferred;
        let empty = provider_request(vec![]);
        assert_eq!(resolve_verification_requirement(&empty, fallback), fallback);

        let garbage = provider_request(vec![CredentialOption::PublicKey(
            GetPublicKeyCredentialOption::new("{{{"),
        )]);
        assert_eq!(resolve_verification_requirement(&garbage, fallback), fallback);

        let silent = provider_request(vec![CredentialOption::PublicKey(
            GetPublicKeyCredentialOption::new(r#"{"challenge":"c"}"#),
        )]);
        assert_eq!(resolve_verification_requirement(&silent, fallback), fallback);
    }

    #[test]
    fn test_create_request_reads_authenticator_selection() {
        let request = CreatePublicKeyCredentialRequest::new(
            r#"{"challenge":"c","rp":{"id":"example.com"},"user":{"id":"u"},
                "authenticatorSelection":{"userVerification":"required"}}"#,
        );
        assert_eq!(
            resolve_verification_requirement(&request, UserVerificationRequirement::Discouraged),
            UserVerificationRequirement::Required
        );
    }
}
