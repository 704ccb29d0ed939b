use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use google_cloud_resourcemanager::client::Client;

use crate::error::Error;

/// Where the project ids to process come from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ProjectSource {
    /// Every active project visible to the caller.
    All,
    /// A newline separated file of project ids.
    File(PathBuf),
}

impl ProjectSource {
    pub async fn load(&self, client: &Client) -> Result<Vec<String>, Error> {
        match self {
            ProjectSource::All => {
                let projects = client.project().list_active().await.map_err(Error::ListProjects)?;
                Ok(projects.into_iter().map(|p| p.project_id).collect())
            }
            ProjectSource::File(path) => read_project_file(path).await,
        }
    }
}

pub async fn read_project_file(path: &Path) -> Result<Vec<String>, Error> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(parse_project_ids(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::FileNotFound(path.to_path_buf())),
        Err(source) => Err(Error::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// One id per line. Blank lines and `#` comments are skipped; the result is sorted and unique.
pub fn parse_project_ids(content: &str) -> Vec<String> {
    let mut ids: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        assert_eq!(parse_project_ids("proj-a\n\nproj-b\n"), vec!["proj-a", "proj-b"]);
    }

    #[test]
    fn test_parse_trims_and_skips_comments() {
        let content = "# production\n  prod-db  \r\nprod-api\n\t\n# staging\nprod-db\n";
        assert_eq!(parse_project_ids(content), vec!["prod-api", "prod-db"]);
    }

    #[tokio::test]
    async fn test_read_project_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"proj-a\n\nproj-b").unwrap();
        let ids = read_project_file(file.path()).await.unwrap();
        assert_eq!(ids, vec!["proj-a", "proj-b"]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.txt");
        let err = read_project_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound(p) if p == path));
    }
}
