use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// Request message for `GetIamPolicy` method.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyRequest {
    /// OPTIONAL: A `GetPolicyOptions` object for specifying options to `GetIamPolicy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GetPolicyOptions>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetPolicyOptions {
    /// The maximum policy version that will be used to format the policy.
    ///
    /// Valid values are 0, 1, and 3. Requests for policies with any conditional
    /// role bindings must specify version 3.
    pub requested_policy_version: Option<i32>,
}

impl GetIamPolicyRequest {
    /// Requests the policy in version 3 so conditional bindings are returned intact.
    pub fn with_conditions() -> Self {
        Self {
            options: Some(GetPolicyOptions {
                requested_policy_version: Some(3),
            }),
        }
    }
}

pub(crate) fn build(base_url: &str, client: &Client, project_id: &str, req: &GetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}:getIamPolicy");
    client.post(url).json(req)
}
