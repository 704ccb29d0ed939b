use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// The subset of the OAuth2 `userinfo` response used to identify the caller.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct UserInfo {
    pub id: Option<String>,
    pub email: Option<String>,
    pub verified_email: Option<bool>,
}

pub(crate) fn build(base_url: &str, client: &Client) -> RequestBuilder {
    let url = format!("{base_url}/oauth2/v2/userinfo");
    client.get(url)
}
