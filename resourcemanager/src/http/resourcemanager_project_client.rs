use std::sync::Arc;

use crate::http::error::Error;
use crate::http::iam::Policy;
use crate::http::projects;
use crate::http::projects::get_iam_policy::GetIamPolicyRequest;
use crate::http::projects::list::{ListProjectsRequest, ListProjectsResponse};
use crate::http::projects::set_iam_policy::SetIamPolicyRequest;
use crate::http::projects::Project;
use crate::http::resourcemanager_client::ResourceManagerClient;

#[derive(Debug, Clone)]
pub struct ResourceManagerProjectClient {
    inner: Arc<ResourceManagerClient>,
}

impl ResourceManagerProjectClient {
    pub fn new(inner: Arc<ResourceManagerClient>) -> Self {
        Self { inner }
    }

    /// Lists every project visible to the caller, following `nextPageToken` to the last page.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list(&self, req: &ListProjectsRequest) -> Result<Vec<Project>, Error> {
        let mut page_token: Option<String> = None;
        let mut projects = vec![];
        loop {
            let builder = projects::list::build(self.inner.endpoint(), self.inner.http(), req, page_token.as_deref());
            let response: ListProjectsResponse = self.inner.send(builder).await?;
            tracing::trace!("fetched page with {} projects", response.projects.len());
            projects.extend(response.projects);
            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(projects)
    }

    /// Lists the `ACTIVE` projects sorted by project id, without duplicates.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_active(&self) -> Result<Vec<Project>, Error> {
        let mut projects: Vec<Project> = self
            .list(&ListProjectsRequest::default())
            .await?
            .into_iter()
            .filter(Project::is_active)
            .collect();
        projects.sort_by(|a, b| a.project_id.cmp(&b.project_id));
        projects.dedup_by(|a, b| a.project_id == b.project_id);
        tracing::debug!("{} active projects", projects.len());
        Ok(projects)
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_iam_policy(&self, project_id: &str, req: &GetIamPolicyRequest) -> Result<Policy, Error> {
        let builder = projects::get_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, req);
        self.inner.send(builder).await
    }

    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn set_iam_policy(&self, project_id: &str, req: &SetIamPolicyRequest) -> Result<Policy, Error> {
        let builder = projects::set_iam_policy::build(self.inner.endpoint(), self.inner.http(), project_id, req);
        self.inner.send(builder).await
    }
}
