//! Classification of the Application Default Credentials in use.

const SERVICE_ACCOUNT_KEY: &str = "service_account";
const USER_CREDENTIALS_KEY: &str = "authorized_user";
const EXTERNAL_ACCOUNT_KEY: &str = "external_account";
const IMPERSONATED_ACCOUNT_KEY: &str = "impersonated_service_account";

/// The kind of credential the client authenticates with, resolved once when the client is configured.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Credential {
    /// A service account key file.
    ServiceAccount { client_email: Option<String> },
    /// End-user credentials, typically from `gcloud auth application-default login`.
    AuthorizedUser,
    /// Workload identity federation.
    ExternalAccount,
    /// A service account impersonated through the IAM credentials API.
    ImpersonatedServiceAccount,
    /// The attached service account of a Google Cloud runtime, from the metadata server.
    ComputeMetadata { email: Option<String> },
    /// A credential file with a `type` this crate does not know.
    Unsupported(String),
}

impl Credential {
    /// Classifies a credentials file by its `type` field.
    pub fn from_type(tp: &str, client_email: Option<String>) -> Self {
        match tp {
            SERVICE_ACCOUNT_KEY => Self::ServiceAccount { client_email },
            USER_CREDENTIALS_KEY => Self::AuthorizedUser,
            EXTERNAL_ACCOUNT_KEY => Self::ExternalAccount,
            IMPERSONATED_ACCOUNT_KEY => Self::ImpersonatedServiceAccount,
            other => Self::Unsupported(other.to_string()),
        }
    }

    #[cfg(feature = "auth")]
    pub fn from_credentials_file(file: &google_cloud_auth::credentials::CredentialsFile) -> Self {
        Self::from_type(&file.tp, file.client_email.clone())
    }

    /// The email of the service account behind this credential, if it is known without a network call.
    pub fn service_account_email(&self) -> Option<&str> {
        match self {
            Self::ServiceAccount { client_email } => client_email.as_deref(),
            Self::ComputeMetadata { email } => email.as_deref(),
            _ => None,
        }
    }
}
