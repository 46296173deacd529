pub mod messages;

use crate::config::Config;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;

/// A fully rendered mail, ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait::async_trait]
pub trait IEmailService: Send + Sync {
    async fn send(&self, email: Email) -> anyhow::Result<()>;
}

/// Delivers mail through an HTTP mail provider.
pub struct HttpEmailService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("To build reqwest client");
        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct SendMailBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[async_trait::async_trait]
impl IEmailService for HttpEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&SendMailBody {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await?;

        if !res.status().is_success() {
            anyhow::bail!("Mail provider rejected message: {}", res.status());
        }
        Ok(())
    }
}

/// Drops every mail. Used when no mail provider is configured.
pub struct NoopEmailService;

#[async_trait::async_trait]
impl IEmailService for NoopEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        tracing::debug!(
            "No mail provider configured, dropping mail to {} with subject: {}",
            email.to,
            email.subject
        );
        Ok(())
    }
}

/// Collects mail in memory so tests can assert on what was sent.
pub struct InMemoryEmailService {
    outbox: Mutex<Vec<Email>>,
}

impl InMemoryEmailService {
    pub fn new() -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.outbox.lock().unwrap().clone()
    }
}

impl Default for InMemoryEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailService for InMemoryEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<()> {
        self.outbox.lock().unwrap().push(email);
        Ok(())
    }
}

pub fn create_email_service(config: &Config) -> std::sync::Arc<dyn IEmailService> {
    match (&config.mail_api_url, &config.mail_api_key) {
        (Some(api_url), Some(api_key)) => std::sync::Arc::new(HttpEmailService::new(
            api_url.clone(),
            api_key.clone(),
            config.mail_from.clone(),
        )),
        _ => std::sync::Arc::new(NoopEmailService),
    }
}
