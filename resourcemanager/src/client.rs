use std::sync::Arc;
use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use token_source::TokenSourceProvider;

use crate::credentials::Credential;
use crate::http::resourcemanager_client::{ResourceManagerClient, RetrySetting};
use crate::http::resourcemanager_project_client::ResourceManagerProjectClient;
use crate::http::userinfo_client::UserInfoClient;

#[derive(Debug)]
pub struct ClientConfig {
    pub http: Option<ClientWithMiddleware>,
    pub resource_manager_endpoint: String,
    pub oauth2_endpoint: String,
    pub token_source_provider: Option<Box<dyn TokenSourceProvider>>,
    pub retry: RetrySetting,
    /// Per request timeout of the default HTTP client.
    pub timeout: Duration,
    pub credential: Option<Credential>,
    pub project_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: None,
            resource_manager_endpoint: "https://cloudresourcemanager.googleapis.com".to_string(),
            oauth2_endpoint: "https://www.googleapis.com".to_string(),
            token_source_provider: None,
            retry: RetrySetting::default(),
            timeout: Duration::from_secs(60),
            credential: None,
            project_id: None,
        }
    }
}

impl ClientConfig {
    pub fn anonymous(mut self) -> Self {
        self.token_source_provider = None;
        self
    }
}

#[cfg(feature = "auth")]
pub use google_cloud_auth;

#[cfg(feature = "auth")]
impl ClientConfig {
    /// Loads Application Default Credentials and records which kind of credential they are.
    pub async fn with_auth(mut self) -> Result<Self, google_cloud_auth::error::Error> {
        let ts = google_cloud_auth::token::DefaultTokenSourceProvider::new(Self::auth_config()).await?;
        let credential = match &ts.source_credentials {
            // Credential file is used.
            Some(cred) => Credential::from_credentials_file(cred),
            // On Google Cloud
            None => Credential::ComputeMetadata {
                email: google_cloud_metadata::email("default").await.ok(),
            },
        };
        tracing::debug!("using credential {:?}", credential);
        self.project_id = ts.project_id.clone();
        self.credential = Some(credential);
        self.token_source_provider = Some(Box::new(ts));
        Ok(self)
    }

    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&crate::http::resourcemanager_client::SCOPES)
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    project_client: ResourceManagerProjectClient,
    userinfo_client: UserInfoClient,
    credential: Option<Credential>,
    project_id: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    /// New client
    pub fn new(config: ClientConfig) -> Self {
        let ts = match config.token_source_provider {
            Some(tsp) => Some(tsp.token_source()),
            None => {
                tracing::trace!("Use anonymous access due to lack of token");
                None
            }
        };
        let http = config.http.unwrap_or_else(|| {
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default();
            reqwest_middleware::ClientBuilder::new(client).build()
        });
        let inner = Arc::new(ResourceManagerClient::new(
            ts,
            config.resource_manager_endpoint.as_str(),
            config.oauth2_endpoint.as_str(),
            http,
            &config.retry,
        ));
        Self {
            project_client: ResourceManagerProjectClient::new(inner.clone()),
            userinfo_client: UserInfoClient::new(inner),
            credential: config.credential,
            project_id: config.project_id,
        }
    }

    pub fn project(&self) -> &ResourceManagerProjectClient {
        &self.project_client
    }

    pub fn userinfo(&self) -> &UserInfoClient {
        &self.userinfo_client
    }

    /// The credential resolved by [`ClientConfig::with_auth`].
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// The project the credentials belong to, if any.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use crate::client::{Client, ClientConfig};
    use crate::credentials::Credential;

    #[tokio::test]
    async fn test_anonymous_client() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/v1/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "projects": [{"projectId": "p1", "lifecycleState": "ACTIVE"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig {
            resource_manager_endpoint: server.uri(),
            oauth2_endpoint: server.uri(),
            credential: Some(Credential::AuthorizedUser),
            ..Default::default()
        }
        .anonymous();
        let client = Client::new(config);
        assert_eq!(client.credential(), Some(&Credential::AuthorizedUser));

        let projects = client.project().list_active().await.unwrap();
        assert_eq!(projects.len(), 1);
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }
}
