use std::collections::HashMap;

pub mod get_iam_policy;
pub mod list;
pub mod set_iam_policy;

/// A Project is a high-level Google Cloud Platform entity. It is a
/// container for ACLs, APIs, App Engine Apps, VMs, and other
/// Google Cloud Platform resources.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The number uniquely identifying the project.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub project_number: Option<i64>,
    /// The unique, user-assigned ID of the Project.
    pub project_id: String,
    /// The Project lifecycle state.
    #[serde(default)]
    pub lifecycle_state: LifecycleState,
    /// The optional user-assigned display name of the Project.
    pub name: Option<String>,
    /// Creation time, in RFC3339 UTC "Zulu" format.
    pub create_time: Option<String>,
    /// The labels associated with this Project.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// An optional reference to a parent Resource.
    pub parent: Option<ResourceId>,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.lifecycle_state == LifecycleState::Active
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    #[default]
    LifecycleStateUnspecified,
    /// The normal and active state.
    Active,
    /// The project has been marked for deletion by the user.
    DeleteRequested,
    /// This lifecycle state is no longer used and not returned by the API.
    DeleteInProgress,
    #[serde(other)]
    Unknown,
}

/// A container to reference an id for any resource type, for example an organization or folder.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// The resource type this id is for, for example `organization` or `folder`.
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_project() {
        let project: Project = serde_json::from_str(
            r#"{
                "projectNumber": "415104041262",
                "projectId": "tokyo-rain-123",
                "lifecycleState": "ACTIVE",
                "name": "Tokyo Rain",
                "labels": {"env": "prod"},
                "parent": {"type": "folder", "id": "1234"}
            }"#,
        )
        .unwrap();
        assert_eq!(project.project_number, Some(415104041262));
        assert_eq!(project.project_id, "tokyo-rain-123");
        assert!(project.is_active());
        assert_eq!(project.name.as_deref(), Some("Tokyo Rain"));
        assert_eq!(project.parent.unwrap().resource_type, "folder");
    }

    #[test]
    fn test_deserialize_project_minimal() {
        let project: Project =
            serde_json::from_str(r#"{"projectId": "p", "lifecycleState": "DELETE_REQUESTED"}"#).unwrap();
        assert_eq!(project.project_number, None);
        assert_eq!(project.name, None);
        assert_eq!(project.lifecycle_state, LifecycleState::DeleteRequested);
        assert!(!project.is_active());

        let project: Project = serde_json::from_str(r#"{"projectId": "p", "lifecycleState": "PURGED"}"#).unwrap();
        assert_eq!(project.lifecycle_state, LifecycleState::Unknown);
    }
}
