//! Record traits defining the persistence contract for all entity types

use chrono::{DateTime, Utc};

use crate::core::field::FieldValue;

/// Base trait for every persisted entity.
///
/// All records carry:
/// - id: numeric identity, assigned by the store on first insert
/// - created_at: set by the store on insert
/// - updated_at: set by the store on every replace, `None` until then
///
/// `field_value` exposes fields by name so that filtering stays generic;
/// a field that exists but holds no value reports [`FieldValue::Null`],
/// while an unknown field name reports `None`.
pub trait Record: Clone + Send + Sync + 'static {
    /// Display name used in error messages (e.g. "User", "Post")
    fn resource_name() -> &'static str;

    /// Get the numeric identity of this record
    fn id(&self) -> i64;

    /// Assign the identity; called exactly once by the store on insert
    fn set_id(&mut self, id: i64);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last-modification timestamp
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Stamp the creation timestamp; called by the store on insert
    fn stamp_created(&mut self, at: DateTime<Utc>);

    /// Stamp the modification timestamp; called by the store on replace
    fn touch(&mut self, at: DateTime<Utc>);

    /// Get the value of a field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// A partial update applicable to a record.
///
/// Implementations apply only the fields they actually carry; everything
/// else on the target record keeps its prior value. Update-input structs
/// (all-`Option` fields) implement this.
pub trait Patch<T>: Send + Sync {
    fn apply(&self, record: &mut T);
}
