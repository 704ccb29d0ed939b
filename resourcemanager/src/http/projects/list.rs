use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::projects::Project;

/// Request message for `projects.list`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsRequest {
    /// The maximum number of Projects to return in the response.
    /// The server can return fewer Projects than requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    /// An expression for filtering the results of the request,
    /// for example `lifecycleState:ACTIVE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsResponse {
    /// The list of Projects that matched the list filter.
    /// Omitted by the service when the page is empty.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Pagination token. Absent on the final page.
    pub next_page_token: Option<String>,
}

pub(crate) fn build(
    base_url: &str,
    client: &Client,
    req: &ListProjectsRequest,
    page_token: Option<&str>,
) -> RequestBuilder {
    let url = format!("{base_url}/projects");
    let builder = client.get(url).query(req);
    if let Some(page_token) = page_token {
        builder.query(&[("pageToken", page_token)])
    } else {
        builder
    }
}
