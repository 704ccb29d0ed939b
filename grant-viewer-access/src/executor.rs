use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

use google_cloud_resourcemanager::http;
use google_cloud_resourcemanager::http::iam::Policy;
use google_cloud_resourcemanager::http::projects::get_iam_policy::GetIamPolicyRequest;
use google_cloud_resourcemanager::http::projects::set_iam_policy::SetIamPolicyRequest;
use google_cloud_resourcemanager::http::resourcemanager_project_client::ResourceManagerProjectClient;

/// The IAM policy calls the executor needs.
#[async_trait]
pub trait IamPolicyApi: Send + Sync {
    async fn get_policy(&self, project_id: &str) -> Result<Policy, http::Error>;
    async fn set_policy(&self, project_id: &str, policy: Policy) -> Result<Policy, http::Error>;
}

#[async_trait]
impl IamPolicyApi for ResourceManagerProjectClient {
    async fn get_policy(&self, project_id: &str) -> Result<Policy, http::Error> {
        self.get_iam_policy(project_id, &GetIamPolicyRequest::with_conditions())
            .await
    }

    async fn set_policy(&self, project_id: &str, policy: Policy) -> Result<Policy, http::Error> {
        let req = SetIamPolicyRequest {
            policy,
            update_mask: None,
        };
        self.set_iam_policy(project_id, &req).await
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Write the binding where it is missing.
    Apply,
    DryRun,
    CheckOnly,
}

impl Mode {
    pub fn writes(&self) -> bool {
        matches!(self, Mode::Apply)
    }
}

/// What to ensure on every project.
#[derive(Clone, Debug)]
pub struct Grant {
    pub member: String,
    pub role: String,
    pub mode: Mode,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Granted,
    AlreadyGranted,
    WouldGrant,
    Failed(String),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TaskResult {
    pub project_id: String,
    pub outcome: Outcome,
}

impl TaskResult {
    pub fn message(&self, role: &str) -> String {
        match &self.outcome {
            Outcome::Granted => format!("Successfully granted {role}"),
            Outcome::AlreadyGranted => format!("Already has {role}"),
            Outcome::WouldGrant => format!("Would grant {role}"),
            Outcome::Failed(message) => message.clone(),
        }
    }
}

/// Counts reduced from the task results, in completion order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GrantSummary {
    pub granted: usize,
    pub already_granted: usize,
    pub would_grant: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl GrantSummary {
    pub fn record(&mut self, result: &TaskResult) {
        match &result.outcome {
            Outcome::Granted => self.granted += 1,
            Outcome::AlreadyGranted => self.already_granted += 1,
            Outcome::WouldGrant => self.would_grant += 1,
            Outcome::Failed(message) => {
                self.failed += 1;
                self.errors.push(format!("Project: {} - {}", result.project_id, message));
            }
        }
    }

    pub fn processed(&self) -> usize {
        self.granted + self.already_granted + self.would_grant + self.failed
    }
}

/// Ensures the grant on a single project. Errors end up in [`Outcome::Failed`].
pub async fn process_project<A>(api: &A, grant: &Grant, project_id: &str) -> Outcome
where
    A: IamPolicyApi + ?Sized,
{
    match api.get_policy(project_id).await {
        Ok(policy) if policy.has_member(&grant.role, &grant.member) => return Outcome::AlreadyGranted,
        Ok(_) => {}
        Err(e) => return Outcome::Failed(format!("Failed to check permissions: {e}")),
    }
    if !grant.mode.writes() {
        return Outcome::WouldGrant;
    }

    let mut policy = match api.get_policy(project_id).await {
        Ok(policy) => policy,
        Err(e) => return Outcome::Failed(e.to_string()),
    };
    if !policy.add_member(&grant.role, &grant.member) {
        return Outcome::AlreadyGranted;
    }
    match api.set_policy(project_id, policy).await {
        Ok(_) => {
            tracing::debug!("granted {} to {} on {}", grant.role, grant.member, project_id);
            Outcome::Granted
        }
        Err(e) => Outcome::Failed(e.to_string()),
    }
}

/// Runs [`process_project`] for every project with at most `max_workers` in flight.
///
/// `on_result` sees every result as it completes, together with the summary so far.
pub async fn run<A, F>(
    api: Arc<A>,
    grant: Arc<Grant>,
    projects: Vec<String>,
    max_workers: usize,
    mut on_result: F,
) -> GrantSummary
where
    A: IamPolicyApi + 'static,
    F: FnMut(&TaskResult, &GrantSummary),
{
    let mut results = stream::iter(projects)
        .map(|project_id| {
            let api = api.clone();
            let grant = grant.clone();
            let id = project_id.clone();
            let task = tokio::spawn(async move {
                let outcome = process_project(api.as_ref(), &grant, &project_id).await;
                TaskResult { project_id, outcome }
            });
            async move {
                match task.await {
                    Ok(result) => result,
                    Err(e) => TaskResult {
                        project_id: id,
                        outcome: Outcome::Failed(format!("task failed: {e}")),
                    },
                }
            }
        })
        .buffer_unordered(max_workers.max(1));

    let mut summary = GrantSummary::default();
    while let Some(result) = results.next().await {
        summary.record(&result);
        on_result(&result, &summary);
    }
    summary
}
