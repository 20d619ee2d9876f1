//! Traffic Attribution - visit classification and session carry-over
//!
//! Classifies an inbound visit into medium, source, campaign, keyword,
//! keyword group, content and referrer by looking at explicit link tags and
//! the referring URL, then keeps that record for the rest of the session.
//!
//! ```
//! use traffic_attribution::{SessionController, testing::{MemorySessionStore, QueryParams}};
//!
//! let mut controller = SessionController::for_site("example.com");
//! let mut store = MemorySessionStore::new();
//!
//! let view = controller.page_view_now(
//!     &QueryParams::new(),
//!     "http://www.google.com/search?q=shoes",
//!     &mut store,
//! );
//! assert_eq!(view.record.source, "Google");
//! assert_eq!(view.record.keyword, "shoes");
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod types;
pub mod traits;

// Matching and parsing helpers
pub mod uri;
pub mod matcher;
pub mod rules;
pub mod template;

// Main functionality modules
pub mod engine;
pub mod codec;
pub mod session;
pub mod testing;

// Re-export main types for convenience
pub use config::{AttributionConfig, AttributionConfigBuilder, MediumNames, QueryKeys};
pub use engine::{classify, ClassificationEngine};
pub use error::{AttributionError, Result};
pub use matcher::Matcher;
pub use rules::{KeywordGroupMatch, KeywordGroupRule, ReferrerGroupRule, SearchEngineRule};
pub use session::{PageView, SessionController, SessionDecision, SessionState};
pub use traits::{QuerySource, SessionStore};
pub use types::{AttributionRecord, BRAND_KEYWORD_GROUP, NO_SOURCE};
