use crate::{RedisXmlRepository, XmlRepository};
use std::fmt;
use std::sync::Arc;
use vesta_config::DataProtectionOptions;
use vesta_redis::RedisCache;

/// Key management settings for the data-protection system.
#[derive(Clone)]
pub struct KeyManagementOptions {
    /// Isolates this application's keys from other applications.
    pub application_name: String,
    xml_repository: Option<Arc<dyn XmlRepository>>,
}

impl KeyManagementOptions {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            xml_repository: None,
        }
    }

    pub fn from_options(options: &DataProtectionOptions) -> Self {
        Self::new(options.application_name.clone())
    }

    /// Persists key descriptors to the shared Redis store.
    #[must_use]
    pub fn persist_keys_to_distributed_store(self, cache: RedisCache) -> Self {
        self.with_xml_repository(Arc::new(RedisXmlRepository::new(cache)))
    }

    #[must_use]
    pub fn with_xml_repository(mut self, repository: Arc<dyn XmlRepository>) -> Self {
        self.xml_repository = Some(repository);
        self
    }

    /// The configured key repository, if any.
    pub fn xml_repository(&self) -> Option<&Arc<dyn XmlRepository>> {
        self.xml_repository.as_ref()
    }
}

impl fmt::Debug for KeyManagementOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyManagementOptions")
            .field("application_name", &self.application_name)
            .field("xml_repository", &self.xml_repository.is_some())
            .finish()
    }
}
