use std::sync::Mutex;
use std::time::Duration;

/// Stores uploaded images and hands back the public URL to serve them
/// from.
#[async_trait::async_trait]
pub trait IImageStore: Send + Sync {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String>;
}

/// Uploads to an HTTP blob store. The blob ends up publicly readable at
/// the same URL it was uploaded to.
pub struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageStore {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("To build reqwest client");
        Self { client, base_url }
    }
}

#[async_trait::async_trait]
impl IImageStore for HttpImageStore {
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), filename);
        let res = self
            .client
            .put(&url)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !res.status().is_success() {
            anyhow::bail!("Blob store rejected upload: {}", res.status());
        }
        Ok(url)
    }
}

/// Keeps uploads in memory. Used in tests and when no blob store is
/// configured.
pub struct InMemoryImageStore {
    uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploaded_filenames(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IImageStore for InMemoryImageStore {
    async fn upload(
        &self,
        filename: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes));
        Ok(format!("memory://{}", filename))
    }
}
