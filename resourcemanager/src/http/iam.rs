/// An Identity and Access Management (IAM) policy, which specifies access
/// controls for Google Cloud resources.
///
/// A `Policy` is a collection of `bindings`. A `binding` binds one or more
/// `members`, or principals, to a single `role`.
///
/// **JSON example:**
///
///     {
///       "bindings": [
///         {
///           "role": "roles/viewer",
///           "members": [
///             "user:mike@example.com",
///             "serviceAccount:my-project-id@appspot.gserviceaccount.com"
///           ]
///         }
///       ],
///       "etag": "BwWWja0YfJA=",
///       "version": 1
///     }
///
/// The `etag` is sent back unchanged by `setIamPolicy`, so a policy modified by
/// someone else between read and write is rejected by the service.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Specifies the format of the policy. Valid values are `0`, `1`, and `3`.
    #[serde(default)]
    pub version: i32,
    /// Associates a list of `members`, or principals, with a `role`.
    #[serde(default)]
    pub bindings: Vec<Binding>,
    /// Used for optimistic concurrency control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Associates `members`, or principals, with a `role`.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    /// Role that is assigned to the list of `members`, or principals.
    /// For example, `roles/viewer`, `roles/editor`, or `roles/owner`.
    pub role: String,
    /// Principals such as `user:{emailid}` or `serviceAccount:{emailid}`.
    #[serde(default)]
    pub members: Vec<String>,
    /// The condition that is associated with this binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Textual representation of an expression in Common Expression Language syntax.
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Policy {
    /// Returns the unconditional binding for `role`.
    pub fn binding(&self, role: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.role == role && b.condition.is_none())
    }

    /// Whether `member` holds `role` without any condition attached.
    pub fn has_member(&self, role: &str, member: &str) -> bool {
        self.binding(role)
            .map(|b| b.members.iter().any(|m| m == member))
            .unwrap_or(false)
    }

    /// Adds `member` to the unconditional binding for `role`, creating the binding if needed.
    ///
    /// Returns `false` when the member was already present and nothing changed.
    pub fn add_member(&mut self, role: &str, member: &str) -> bool {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.role == role && b.condition.is_none())
        {
            Some(binding) => {
                if binding.members.iter().any(|m| m == member) {
                    return false;
                }
                binding.members.push(member.to_string());
            }
            None => self.bindings.push(Binding {
                role: role.to_string(),
                members: vec![member.to_string()],
                condition: None,
            }),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> Policy {
        serde_json::from_str(
            r#"{
                "version": 3,
                "etag": "BwWWja0YfJA=",
                "bindings": [
                    {"role": "roles/owner", "members": ["user:owner@example.com"]},
                    {
                        "role": "roles/viewer",
                        "members": ["user:temp@example.com"],
                        "condition": {"title": "expirable", "expression": "request.time < timestamp('2020-10-01T00:00:00.000Z')"}
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_has_member_ignores_conditional_binding() {
        let policy = policy();
        assert!(policy.has_member("roles/owner", "user:owner@example.com"));
        assert!(!policy.has_member("roles/viewer", "user:temp@example.com"));
        assert!(!policy.has_member("roles/editor", "user:owner@example.com"));
    }

    #[test]
    fn test_add_member_creates_binding_once() {
        let mut policy = policy();
        assert!(policy.add_member("roles/viewer", "user:alice@example.com"));
        assert!(!policy.add_member("roles/viewer", "user:alice@example.com"));
        let unconditional: Vec<_> = policy
            .bindings
            .iter()
            .filter(|b| b.role == "roles/viewer" && b.condition.is_none())
            .collect();
        assert_eq!(unconditional.len(), 1);
        assert_eq!(unconditional[0].members, vec!["user:alice@example.com"]);
        // the conditional binding is left as it was
        assert_eq!(policy.bindings.len(), 3);
        assert_eq!(policy.bindings[1].members, vec!["user:temp@example.com"]);
    }

    #[test]
    fn test_add_member_merges_into_existing_binding() {
        let mut policy = policy();
        assert!(policy.add_member("roles/owner", "serviceAccount:sa@p.iam.gserviceaccount.com"));
        assert_eq!(policy.bindings.len(), 2);
        assert_eq!(
            policy.bindings[0].members,
            vec!["user:owner@example.com", "serviceAccount:sa@p.iam.gserviceaccount.com"]
        );
    }

    #[test]
    fn test_serialize_keeps_etag_and_skips_empty_fields() {
        let mut policy = Policy::default();
        policy.add_member("roles/viewer", "user:a@example.com");
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"version": 0, "bindings": [{"role": "roles/viewer", "members": ["user:a@example.com"]}]})
        );

        let json = serde_json::to_value(self::policy()).unwrap();
        assert_eq!(json["etag"], "BwWWja0YfJA=");
        assert_eq!(json["version"], 3);
    }

    #[test]
    fn test_deserialize_empty_policy() {
        let policy: Policy = serde_json::from_str(r#"{"etag": "ACAB"}"#).unwrap();
        assert!(policy.bindings.is_empty());
        assert_eq!(policy.version, 0);
    }
}
