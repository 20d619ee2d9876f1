use crate::traits::{QuerySource, SessionStore};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use url::form_urlencoded;

/// Map-backed query parameters for the current page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub params: HashMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            params: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Parse the query string of a landing page URL.
    ///
    /// The first non-empty value of a repeated key is kept.
    pub fn from_url(url: &str) -> Self {
        let mut params = HashMap::new();
        for (key, value) in form_urlencoded::parse(crate::uri::query_of(url).as_bytes()) {
            let slot = params.entry(key.into_owned()).or_insert_with(String::new);
            if slot.is_empty() {
                *slot = value.into_owned();
            }
        }
        Self { params }
    }

    #[must_use]
    pub fn with<S: Into<String>>(mut self, key: S, value: S) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl QuerySource for QueryParams {
    fn query_param(&self, name: &str) -> String {
        self.params.get(name).cloned().unwrap_or_default()
    }
}

/// A persisted blob with its absolute expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub value: String,
    pub expiry: DateTime<Utc>,
}

/// Map-backed session store honouring expiry against its own clock
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    entries: HashMap<String, StoredBlob>,
    now: DateTime<Utc>,
    writes: usize,
    deletes: usize,
}

impl MemorySessionStore {
    /// Store whose clock reads the current time
    pub fn new() -> Self {
        Self::with_clock(Utc::now())
    }

    pub fn with_clock(now: DateTime<Utc>) -> Self {
        Self {
            entries: HashMap::new(),
            now,
            writes: 0,
            deletes: 0,
        }
    }

    /// Move the store's clock; blobs whose expiry has passed read as absent
    pub fn set_clock(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    pub fn clock(&self) -> DateTime<Utc> {
        self.now
    }

    /// Raw entry, ignoring expiry
    pub fn entry(&self, name: &str) -> Option<&StoredBlob> {
        self.entries.get(name)
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn delete_count(&self) -> usize {
        self.deletes
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemorySessionStore {
    fn read_session_blob(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .filter(|blob| blob.expiry > self.now)
            .map(|blob| blob.value.clone())
    }

    fn write_session_blob(&mut self, name: &str, value: &str, expiry: DateTime<Utc>) {
        self.writes += 1;
        self.entries.insert(
            name.to_string(),
            StoredBlob {
                value: value.to_string(),
                expiry,
            },
        );
    }

    fn delete_session_blob(&mut self, name: &str) {
        self.deletes += 1;
        self.entries.remove(name);
    }
}
