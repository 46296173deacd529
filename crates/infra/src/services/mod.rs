mod email;
mod image_store;
mod profile_api;

use crate::config::Config;
use std::sync::Arc;

pub use email::{
    create_email_service, messages, Email, HttpEmailService, IEmailService, InMemoryEmailService,
    NoopEmailService,
};
pub use image_store::{HttpImageStore, IImageStore, InMemoryImageStore};
pub use profile_api::{HttpProfileApi, IProfileApi, NoopProfileApi, ProfileInfo};

/// External collaborators: mail delivery, blob storage and the identity
/// provider profile endpoint. Every outbound call they make has a
/// bounded timeout.
#[derive(Clone)]
pub struct Services {
    pub email: Arc<dyn IEmailService>,
    pub image_store: Arc<dyn IImageStore>,
    pub profile_api: Arc<dyn IProfileApi>,
}

impl Services {
    pub fn create(config: &Config) -> Self {
        let image_store: Arc<dyn IImageStore> = match &config.blob_store_url {
            Some(base_url) => Arc::new(HttpImageStore::new(base_url.clone())),
            None => Arc::new(InMemoryImageStore::new()),
        };
        let profile_api: Arc<dyn IProfileApi> = match &config.auth_userinfo_url {
            Some(userinfo_url) => Arc::new(HttpProfileApi::new(userinfo_url.clone())),
            None => Arc::new(NoopProfileApi),
        };
        Self {
            email: create_email_service(config),
            image_store,
            profile_api,
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            email: Arc::new(InMemoryEmailService::new()),
            image_store: Arc::new(InMemoryImageStore::new()),
            profile_api: Arc::new(NoopProfileApi),
        }
    }
}
