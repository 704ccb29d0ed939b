use std::path::PathBuf;

use google_cloud_resourcemanager::client::google_cloud_auth;
use google_cloud_resourcemanager::http;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to get default credentials: {0}")]
    Credentials(#[from] google_cloud_auth::error::Error),

    #[error("Failed to list projects: {0}")]
    ListProjects(#[source] http::Error),

    #[error("No active projects found")]
    NoProjects,

    #[error("Failed to write to file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// What the operator can do about it, printed below the error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Credentials(_) => Some("Make sure you're authenticated:\n  gcloud auth application-default login"),
            Error::ListProjects(_) => Some("Check that the Cloud Resource Manager API is reachable and your credentials are valid."),
            _ => None,
        }
    }
}
