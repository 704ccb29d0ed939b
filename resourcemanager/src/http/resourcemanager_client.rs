use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::Response;
use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use token_source::TokenSource;

use crate::http::error::{Error, ErrorWrapper};

pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/cloud-platform",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Backoff applied to transient transport errors and retriable statuses.
#[derive(Clone, Debug)]
pub struct RetrySetting {
    pub from_millis: u64,
    pub max_delay: Option<Duration>,
    pub take: usize,
}

impl Default for RetrySetting {
    fn default() -> Self {
        Self {
            from_millis: 500,
            max_delay: Some(Duration::from_secs(10)),
            take: 3,
        }
    }
}

impl RetrySetting {
    fn strategy(&self) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_jitter()
            .with_min_delay(Duration::from_millis(self.from_millis))
            .with_max_times(self.take);
        match self.max_delay {
            Some(max_delay) => builder.with_max_delay(max_delay),
            None => builder,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceManagerClient {
    ts: Option<Arc<dyn TokenSource>>,
    endpoint: String,
    oauth2_endpoint: String,
    http: Client,
    backoff: ExponentialBuilder,
}

impl ResourceManagerClient {
    pub(crate) fn new(
        ts: Option<Arc<dyn TokenSource>>,
        endpoint: &str,
        oauth2_endpoint: &str,
        http: Client,
        retry: &RetrySetting,
    ) -> Self {
        Self {
            ts,
            endpoint: format!("{endpoint}/v1"),
            oauth2_endpoint: oauth2_endpoint.to_string(),
            http,
            backoff: retry.strategy(),
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub(crate) fn oauth2_endpoint(&self) -> &str {
        self.oauth2_endpoint.as_str()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    async fn with_headers(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let builder = builder
            .header("X-Goog-Api-Client", "rust")
            .header(reqwest::header::USER_AGENT, "google-cloud-resourcemanager");
        match &self.ts {
            Some(ts) => {
                let token = ts.token().await.map_err(Error::TokenSource)?;
                Ok(builder.header(reqwest::header::AUTHORIZATION, token))
            }
            None => Ok(builder),
        }
    }

    pub async fn send<T>(&self, builder: RequestBuilder) -> Result<T, Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.execute(builder).await?;
        Ok(response.json().await?)
    }

    /// Sends the request, retrying retriable failures with exponential backoff.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, Error> {
        let this = self;
        let attempt = move || {
            let request = builder.try_clone();
            async move {
                let request = request.ok_or(Error::RequestNotCloneable)?;
                let request = this.with_headers(request).await?;
                let response = request.send().await?;
                Self::check_response_status(response).await
            }
        };
        attempt
            .retry(self.backoff.clone())
            .when(Error::is_retriable)
            .notify(|err, delay| tracing::debug!("retrying in {:?}: {}", delay, err))
            .await
    }

    /// Checks whether an HTTP response is successful and returns it, or returns an error.
    async fn check_response_status(response: Response) -> Result<Response, Error> {
        // Check the status code, returning the response if it is not an error.
        let error = match response.error_for_status_ref() {
            Ok(_) => return Ok(response),
            Err(error) => error,
        };

        // try to extract a response error, falling back to the status error if it can not be parsed.
        Err(response
            .json::<ErrorWrapper>()
            .await
            .map(|wrapper| Error::Response(wrapper.error))
            .unwrap_or(Error::HttpClient(error)))
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use token_source::TokenSource;

    use crate::http::resourcemanager_client::{ResourceManagerClient, RetrySetting};

    #[ctor::ctor]
    fn init() {
        let filter = tracing_subscriber::filter::EnvFilter::from_default_env()
            .add_directive("gcloud_resourcemanager=trace".parse().unwrap());
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    #[derive(Debug)]
    pub struct StaticTokenSource;

    #[async_trait::async_trait]
    impl TokenSource for StaticTokenSource {
        async fn token(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Ok("Bearer test-token".to_string())
        }
    }

    pub fn create_client(uri: &str) -> Arc<ResourceManagerClient> {
        let http = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        let retry = RetrySetting {
            from_millis: 1,
            max_delay: None,
            take: 3,
        };
        Arc::new(ResourceManagerClient::new(
            Some(Arc::new(StaticTokenSource)),
            uri,
            uri,
            http,
            &retry,
        ))
    }
}
