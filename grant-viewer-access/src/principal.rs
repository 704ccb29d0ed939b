use std::fmt;

use google_cloud_resourcemanager::client::Client;
use google_cloud_resourcemanager::credentials::Credential;

use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberKind {
    User,
    ServiceAccount,
}

impl MemberKind {
    fn prefix(&self) -> &'static str {
        match self {
            MemberKind::User => "user",
            MemberKind::ServiceAccount => "serviceAccount",
        }
    }
}

/// The identity the role is granted to, rendered as an IAM member such as `user:alice@example.com`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Principal {
    pub kind: MemberKind,
    pub email: String,
}

impl Principal {
    pub fn user(email: &str) -> Self {
        Self {
            kind: MemberKind::User,
            email: email.to_string(),
        }
    }

    pub fn service_account(email: &str) -> Self {
        Self {
            kind: MemberKind::ServiceAccount,
            email: email.to_string(),
        }
    }

    /// Service account emails all end with `gserviceaccount.com`.
    pub fn from_email(email: &str) -> Self {
        if email.ends_with(".gserviceaccount.com") {
            Self::service_account(email)
        } else {
            Self::user(email)
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.email)
    }
}

/// Resolves the caller from the credentials in use, asking the userinfo endpoint
/// when the credential itself does not carry an email.
pub async fn current(client: &Client) -> Result<Principal, Error> {
    if let Some(email) = client.credential().and_then(Credential::service_account_email) {
        return Ok(Principal::service_account(email));
    }
    let info = client.userinfo().get().await.map_err(Error::Identity)?;
    match info.email {
        Some(email) if !email.is_empty() => {
            let principal = match client.credential() {
                Some(Credential::ServiceAccount { .. })
                | Some(Credential::ImpersonatedServiceAccount)
                | Some(Credential::ComputeMetadata { .. }) => Principal::service_account(&email),
                _ => Principal::from_email(&email),
            };
            Ok(principal)
        }
        _ => Err(Error::UnknownIdentity),
    }
}
