use std::path::PathBuf;

use google_cloud_resourcemanager::client::google_cloud_auth;
use google_cloud_resourcemanager::http;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to get default credentials: {0}")]
    Credentials(#[from] google_cloud_auth::error::Error),

    #[error("Could not determine current user: {0}")]
    Identity(#[source] http::Error),

    #[error("Could not determine current user.")]
    UnknownIdentity,

    #[error("Failed to list projects: {0}")]
    ListProjects(#[source] http::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No projects to process")]
    NoProjects,

    #[error("Failed to read confirmation: {0}")]
    Confirm(#[source] std::io::Error),

    #[error("Aborted.")]
    Aborted,

    #[error("Failed to write error log {}: {source}", path.display())]
    WriteLog {
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
            Error::Identity(_) | Error::UnknownIdentity => {
                Some("Please specify --user or --service-account explicitly.")
            }
            Error::FileNotFound(_) => Some("Create it with list-projects, or pass --all to process every project."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::FileNotFound(PathBuf::from("projects.txt")).to_string(),
            "File not found: projects.txt"
        );
        assert_eq!(Error::NoProjects.to_string(), "No projects to process");
        assert!(Error::UnknownIdentity.hint().unwrap().contains("--service-account"));
        assert!(Error::Aborted.hint().is_none());
    }
}
