//! Controller layer: generic CRUD plus one controller per entity
//!
//! Controllers own validation, uniqueness checks and relationship
//! queries; persistence and cascades stay in the store. Each controller
//! wraps a [`CrudController`] for the plain operations.

pub mod base;
pub mod category;
pub mod comment;
pub mod post;
pub mod profile;
pub mod role;
pub mod user;

pub use base::CrudController;
pub use category::CategoryController;
pub use comment::CommentController;
pub use post::PostController;
pub use profile::ProfileController;
pub use role::RoleController;
pub use user::UserController;
