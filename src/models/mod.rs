//! Entity records, association rows, and their input/response shapes
//!
//! Six entity types plus two pure association rows. Records carry no
//! behavior beyond field access; relationships live in the store.

pub mod category;
pub mod comment;
pub mod post;
pub mod profile;
pub mod role;
pub mod user;

pub use category::{Category, CategoryCreate, CategorySummary, CategoryUpdate, CategoryWithPostCount};
pub use comment::{Comment, CommentCreate, CommentDetail, CommentUpdate, ReplyCreate};
pub use post::{Post, PostCreate, PostDetail, PostUpdate};
pub use profile::{Profile, ProfileCreate, ProfileDetail, ProfileUpdate};
pub use role::{Role, RoleAssignment, RoleCreate, RoleDetail, RoleUpdate};
pub use user::{User, UserCreate, UserSummary, UserUpdate};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Association row linking one post to one category; keyed by the pair
#[derive(Debug, Clone, Serialize)]
pub struct PostCategory {
    pub post_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
}
