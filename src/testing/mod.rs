//! In-memory host collaborators for embedding and tests

pub mod memory;

pub use memory::{MemorySessionStore, QueryParams, StoredBlob};
