use std::sync::Arc;

use crate::http::error::Error;
use crate::http::resourcemanager_client::ResourceManagerClient;
use crate::http::userinfo;
use crate::http::userinfo::UserInfo;

#[derive(Debug, Clone)]
pub struct UserInfoClient {
    inner: Arc<ResourceManagerClient>,
}

impl UserInfoClient {
    pub fn new(inner: Arc<ResourceManagerClient>) -> Self {
        Self { inner }
    }

    /// Returns the identity the access token was issued to.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get(&self) -> Result<UserInfo, Error> {
        let builder = userinfo::build(self.inner.oauth2_endpoint(), self.inner.http());
        self.inner.send(builder).await
    }
}
