//! Values exchanged with the platform credential-provider service.

pub mod entry;
pub mod request;

pub use entry::{CredentialEntry, PasswordCredentialEntry, PublicKeyCredentialEntry};
pub use request::{
    BeginGetPasswordOption, BeginGetPublicKeyCredentialOption, CreatePublicKeyCredentialRequest,
    CredentialOption, CredentialRequest, GetCredentialsRequest, GetPasswordOption,
    GetPublicKeyCredentialOption, ProviderGetCredentialRequest,
};
