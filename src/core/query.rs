//! Query parameters, filters and ordering for list operations

use serde::Deserialize;

use crate::core::field::FieldValue;
use crate::core::record::Record;

/// Default number of items returned by a list operation
pub const DEFAULT_LIMIT: usize = 100;

/// Hard ceiling on items per list operation
pub const MAX_LIMIT: usize = 100;

/// Offset/limit pagination parameters, extractable from a query string
///
/// ```text
/// GET /posts?skip=20&limit=10
/// ```
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Number of records to skip
    pub skip: usize,

    /// Maximum number of records to return
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// A query fetching at most one record
    pub fn one() -> Self {
        Self { skip: 0, limit: 1 }
    }

    /// Number of records to skip
    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Limit, clamped into `1..=MAX_LIMIT`
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }
}

/// An exact-match conjunction of field/value pairs.
///
/// A [`FieldValue::Null`] entry is an IS-NULL test. Filter keys that the
/// record does not know are ignored. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    conditions: Vec<(String, FieldValue)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    /// Require `field IS NULL`
    pub fn is_null(self, field: &str) -> Self {
        self.eq(field, FieldValue::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check whether a record satisfies every condition
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.conditions
            .iter()
            .all(|(field, want)| match record.field_value(field) {
                Some(have) => have == *want,
                // unknown field: the condition is ignored
                None => true,
            })
    }
}

/// Sort key for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    CreatedAt,
    UpdatedAt,
}

/// Ordering directive for list operations
///
/// Sorting is stable: records comparing equal keep their insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    /// Most recent first; the ordering used by every "recent" query
    pub fn created_desc() -> Self {
        Self {
            key: SortKey::CreatedAt,
            descending: true,
        }
    }

    /// Parse a `field` / `field:asc` / `field:desc` expression
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, dir) = match expr.split_once(':') {
            Some((f, d)) => (f, d),
            None => (expr, "asc"),
        };
        let key = match field {
            "id" => SortKey::Id,
            "created_at" => SortKey::CreatedAt,
            "updated_at" => SortKey::UpdatedAt,
            _ => return None,
        };
        let descending = match dir {
            "asc" => false,
            "desc" => true,
            _ => return None,
        };
        Some(Self { key, descending })
    }

    /// Sort a collection of records in place; equal keys keep their
    /// insertion order in either direction
    pub fn apply<T: Record>(&self, records: &mut [T]) {
        records.sort_by(|a, b| {
            let ord = match self.key {
                SortKey::Id => a.id().cmp(&b.id()),
                SortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
                SortKey::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
            };
            if self.descending { ord.reverse() } else { ord }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.skip(), 0);
        assert_eq!(query.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_clamped() {
        assert_eq!(ListQuery::new(0, 0).limit(), 1);
        assert_eq!(ListQuery::new(0, 10_000).limit(), MAX_LIMIT);
        assert_eq!(ListQuery::new(0, 5).limit(), 5);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(
            SortOrder::parse("created_at:desc"),
            Some(SortOrder::created_desc())
        );
        assert_eq!(
            SortOrder::parse("id"),
            Some(SortOrder {
                key: SortKey::Id,
                descending: false,
            })
        );
        assert_eq!(SortOrder::parse("title:desc"), None);
        assert_eq!(SortOrder::parse("id:sideways"), None);
    }
}
