//! Passkey credential-provider routing.
//!
//! [`CredentialManager`] sits between the platform credential-provider
//! service and the credential SDK. For each request it picks the trust
//! origin the SDK has to validate the caller against, hands the ceremony to
//! the SDK and maps the result back into the platform's JSON shapes.
//!
//! SDK failures never reach the platform: they are logged and reported as
//! [`CeremonyError::InternalError`].

pub mod authenticate;
pub mod builder;
pub mod entries;
pub mod manager;
pub mod register;
pub mod response;
pub mod session;
pub mod verification;

pub use builder::CredentialEntryBuilder;
pub use manager::{CredentialManager, CredentialResponse};
pub use response::{Fido2AttestationResponse, Fido2PublicKeyCredential};
pub use session::VerificationSession;
pub use verification::{VerificationRequirementSource, resolve_verification_requirement};

use crate::origin::OriginError;
use crate::sdk::SdkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CeremonyError {
    #[error("missing host url")]
    MissingHostUrl,
    #[error("invalid app signature")]
    InvalidAppSignature,
    #[error("internal error")]
    InternalError,
}

impl From<OriginError> for CeremonyError {
    fn from(e: OriginError) -> Self {
        match e {
            OriginError::MissingHostUrl => Self::MissingHostUrl,
            OriginError::InvalidAppSignature => Self::InvalidAppSignature,
        }
    }
}

/// Serialized platform response on success.
pub type CeremonyResult = Result<String, CeremonyError>;

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Relying party id required")]
    MissingRelyingPartyId,
    #[error("Error decrypting credentials: {0}")]
    Decrypt(#[source] SdkError),
}
