use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Base URL of the browser app, used for links in outgoing emails
    pub frontend_base_url: String,
    /// How far ahead of an event's start time the reminder sweep aims.
    /// The default of one minute suits test environments; production
    /// deployments set `REMINDER_LEAD_TIME_MILLIS` to 24 hours
    /// (86_400_000).
    pub reminder_lead_time_millis: i64,
    /// Half-width of the window around the reminder target time in
    /// which events are picked up by a sweep tick.
    pub reminder_tolerance_millis: i64,
    /// Base64-encoded RSA public key (PEM) of the external token
    /// issuer. Protected routes reject every request when unset.
    pub auth_public_key_b64: Option<String>,
    /// Identity provider endpoint for the secondary profile fetch when
    /// token claims carry no email.
    pub auth_userinfo_url: Option<String>,
    /// Transactional mail collaborator. Emails are logged and dropped
    /// when unset.
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    /// Blob storage collaborator for image uploads.
    pub blob_store_url: Option<String>,
}

fn env_millis(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(value) => match value.parse::<i64>() {
            Ok(millis) => millis,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let auth_public_key_b64 = std::env::var("AUTH_PUBLIC_KEY_B64").ok();
        if auth_public_key_b64.is_none() {
            warn!("Did not find AUTH_PUBLIC_KEY_B64 environment variable. Protected routes will reject all requests.");
        }

        let mail_api_url = std::env::var("MAIL_API_URL").ok();
        if mail_api_url.is_none() {
            info!("Did not find MAIL_API_URL environment variable. Outgoing emails will be logged and dropped.");
        }

        Self {
            port,
            frontend_base_url: std::env::var("FRONTEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            reminder_lead_time_millis: env_millis("REMINDER_LEAD_TIME_MILLIS", 1000 * 60),
            reminder_tolerance_millis: env_millis("REMINDER_TOLERANCE_MILLIS", 1000 * 30),
            auth_public_key_b64,
            auth_userinfo_url: std::env::var("AUTH_USERINFO_URL").ok(),
            mail_api_url,
            mail_api_key: std::env::var("MAIL_API_KEY").ok(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@eventease.app".into()),
            blob_store_url: std::env::var("BLOB_STORE_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
