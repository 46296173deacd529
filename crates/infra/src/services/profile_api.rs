use serde::Deserialize;
use std::time::Duration;

/// Profile attributes from the identity provider's userinfo endpoint.
/// Fetched lazily when a verified token carries no email claim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInfo {
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[async_trait::async_trait]
pub trait IProfileApi: Send + Sync {
    async fn fetch(&self, access_token: &str) -> Option<ProfileInfo>;
}

pub struct HttpProfileApi {
    client: reqwest::Client,
    userinfo_url: String,
}

impl HttpProfileApi {
    pub fn new(userinfo_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("To build reqwest client");
        Self {
            client,
            userinfo_url,
        }
    }
}

#[async_trait::async_trait]
impl IProfileApi for HttpProfileApi {
    async fn fetch(&self, access_token: &str) -> Option<ProfileInfo> {
        let res = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .ok()?;

        if !res.status().is_success() {
            tracing::warn!("Userinfo endpoint returned: {}", res.status());
            return None;
        }
        res.json().await.ok()
    }
}

/// No identity provider profile endpoint available.
pub struct NoopProfileApi;

#[async_trait::async_trait]
impl IProfileApi for NoopProfileApi {
    async fn fetch(&self, _access_token: &str) -> Option<ProfileInfo> {
        None
    }
}
