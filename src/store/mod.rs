//! Persistence layer: the unit of work behind every controller call
//!
//! The store exposes fetch/list/insert/replace/remove primitives generic
//! over the entity type, plus association-row management and explicit
//! cascade deletion. One store operation is one unit of work: it acquires
//! the state lock once and publishes either all of its effects or none.

mod memory;

use thiserror::Error;

pub use memory::{DbState, MemoryStore, Stored, Table};

/// Errors raised by the storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The state lock was poisoned by a panicking writer
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// A replace targeted a row that no longer exists
    #[error("{resource} with id {id} is gone")]
    RowMissing { resource: &'static str, id: i64 },
}

/// A specialized Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
