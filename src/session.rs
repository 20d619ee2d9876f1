//! Per-page-view session decision
//!
//! Each page view either starts a session, replaces the stored attribution
//! because the visitor arrived from somewhere new, or restores the record
//! carried in the session blob.

use crate::codec;
use crate::config::AttributionConfig;
use crate::engine::ClassificationEngine;
use crate::traits::{QuerySource, SessionStore};
use crate::types::AttributionRecord;
use chrono::{DateTime, Utc};

/// Whether a session blob was live when the page view began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    SessionActive,
}

/// What the controller did for a page view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDecision {
    /// No blob was present; the visit was classified and stored
    Started,
    /// A blob was present but the visit carries new attribution
    Replaced,
    /// The stored record was reused without reclassifying
    Restored,
}

/// Result of one page view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub record: AttributionRecord,
    pub decision: SessionDecision,
    pub previous_state: SessionState,
}

/// Owns the configuration and the record exposed for the current page
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    config: AttributionConfig,
    engine: ClassificationEngine,
    current: AttributionRecord,
}

impl SessionController {
    pub fn new(config: AttributionConfig) -> Self {
        Self {
            config,
            engine: ClassificationEngine::new(),
            current: AttributionRecord::default(),
        }
    }

    /// Controller with default tables for the given site
    pub fn for_site<S: Into<String>>(site_domain: S) -> Self {
        Self::new(AttributionConfig::for_site(site_domain))
    }

    pub fn config(&self) -> &AttributionConfig {
        &self.config
    }

    /// Mutable access for setters; not to be used during a page view
    pub fn config_mut(&mut self) -> &mut AttributionConfig {
        &mut self.config
    }

    /// Record exposed for the current page
    pub fn record(&self) -> &AttributionRecord {
        &self.current
    }

    pub fn reset_keys(&mut self) {
        self.config.reset_keys();
    }

    /// Restore every setting to its default and clear the current record
    pub fn reset_all(&mut self) {
        self.config.reset_all();
        self.current = AttributionRecord::default();
    }

    pub fn state<S: SessionStore + ?Sized>(&self, store: &S) -> SessionState {
        match store.read_session_blob(&self.config.session_name) {
            Some(_) => SessionState::SessionActive,
            None => SessionState::NoSession,
        }
    }

    /// Whether a live session should be replaced by a fresh classification.
    ///
    /// True for a referrer outside the ignore list, or for a link tagged
    /// with both medium and source.
    pub fn should_overwrite<Q: QuerySource + ?Sized>(&self, query: &Q, referrer: &str) -> bool {
        let new_referrer = !referrer.is_empty()
            && !self.config.is_ignored_referrer(&crate::uri::domain_of(referrer));
        let tagged = !query.query_param(&self.config.keys.source).is_empty()
            && !query.query_param(&self.config.keys.medium).is_empty();
        new_referrer || tagged
    }

    /// Decide attribution for one page view
    pub fn page_view<Q, S>(&mut self, query: &Q, referrer: &str, store: &mut S, now: DateTime<Utc>) -> PageView
    where
        Q: QuerySource + ?Sized,
        S: SessionStore + ?Sized,
    {
        let name = self.config.session_name.clone();

        let (previous_state, decision) = match store.read_session_blob(&name) {
            None => {
                self.classify_and_store(query, referrer, store, now, false);
                (SessionState::NoSession, SessionDecision::Started)
            }
            Some(_) if self.should_overwrite(query, referrer) => {
                self.classify_and_store(query, referrer, store, now, true);
                (SessionState::SessionActive, SessionDecision::Replaced)
            }
            Some(blob) => {
                self.current = codec::decode(&blob);
                if self.config.first_page_only {
                    self.current.clear_reportable();
                }
                (SessionState::SessionActive, SessionDecision::Restored)
            }
        };

        tracing::debug!(
            ?previous_state,
            ?decision,
            medium = %self.current.medium,
            source = %self.current.source,
            "session decision"
        );

        PageView {
            record: self.current.clone(),
            decision,
            previous_state,
        }
    }

    /// `page_view` at the current wall-clock time
    pub fn page_view_now<Q, S>(&mut self, query: &Q, referrer: &str, store: &mut S) -> PageView
    where
        Q: QuerySource + ?Sized,
        S: SessionStore + ?Sized,
    {
        self.page_view(query, referrer, store, Utc::now())
    }

    fn classify_and_store<Q, S>(&mut self, query: &Q, referrer: &str, store: &mut S, now: DateTime<Utc>, replace: bool)
    where
        Q: QuerySource + ?Sized,
        S: SessionStore + ?Sized,
    {
        self.current = self.engine.classify(query, referrer, &self.config);

        let name = &self.config.session_name;
        let expiry = now
            .checked_add_signed(self.config.session_timeout())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        // Delete first so the new expiry is not merged into the old entry
        if replace {
            store.delete_session_blob(name);
        }
        store.write_session_blob(name, &codec::encode(&self.current), expiry);
    }
}
