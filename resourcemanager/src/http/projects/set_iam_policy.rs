use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::iam::Policy;

/// Request message for `SetIamPolicy` method.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetIamPolicyRequest {
    /// REQUIRED: The complete policy to be applied to the project.
    pub policy: Policy,
    /// OPTIONAL: A FieldMask specifying which fields of the policy to modify.
    /// If no mask is provided, the default mask `bindings, etag` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<String>,
}

pub(crate) fn build(base_url: &str, client: &Client, project_id: &str, req: &SetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{base_url}/projects/{project_id}:setIamPolicy");
    client.post(url).json(req)
}
