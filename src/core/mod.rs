//! Core types shared by the store, controllers and HTTP boundary

pub mod error;
pub mod field;
pub mod password;
pub mod query;
pub mod record;

pub use error::{AppError, AppResult, ErrorResponse};
pub use field::{FieldFormat, FieldValue};
pub use password::{Argon2Hasher, PasswordHasher};
pub use query::{Filters, ListQuery, SortKey, SortOrder};
pub use record::{Patch, Record};
