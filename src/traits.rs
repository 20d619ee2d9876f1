use crate::error::Result;
use chrono::{DateTime, Utc};

/// Read access to the current request's query parameters
pub trait QuerySource {
    /// Value of a query parameter on the current page, empty when absent
    fn query_param(&self, name: &str) -> String;

    /// Value of a query parameter on another URL, such as the referrer
    fn query_param_from(&self, url: &str, name: &str) -> String {
        crate::uri::query_param(url, name)
    }
}

/// Opaque persistence for the encoded session blob
///
/// Implementations own expiry: once `expiry` has passed the blob must read
/// back as absent.
pub trait SessionStore {
    fn read_session_blob(&self, name: &str) -> Option<String>;

    fn write_session_blob(&mut self, name: &str, value: &str, expiry: DateTime<Utc>);

    fn delete_session_blob(&mut self, name: &str);
}

/// Trait for configuration validation
pub trait ConfigValidator {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}

impl<Q: QuerySource + ?Sized> QuerySource for &Q {
    fn query_param(&self, name: &str) -> String {
        (**self).query_param(name)
    }

    fn query_param_from(&self, url: &str, name: &str) -> String {
        (**self).query_param_from(url, name)
    }
}
