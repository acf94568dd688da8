//! # quill
//!
//! A REST API for a small blogging platform: users write posts, file them
//! under categories, and discuss them in threaded comments. Profiles and
//! roles hang off users.
//!
//! The crate is layered bottom-up:
//!
//! - [`core`]: error taxonomy, field values, filters, pagination, hashing
//! - [`models`]: entity records and their input/response shapes
//! - [`store`]: the in-memory unit-of-work layer with cascade deletion
//! - [`controllers`]: generic CRUD plus one controller per entity
//! - [`server`]: the axum route surface
//! - [`config`]: YAML configuration with environment overrides
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use quill::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryStore::new();
//!     let app = build_router(AppState::new(store));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controllers;
pub mod core;
pub mod models;
pub mod server;
pub mod store;

/// Commonly used types, re-exported in one place
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::controllers::{
        CategoryController, CommentController, CrudController, PostController,
        ProfileController, RoleController, UserController,
    };
    pub use crate::core::{
        AppError, AppResult, Argon2Hasher, FieldValue, Filters, ListQuery, PasswordHasher,
        Record, SortOrder,
    };
    pub use crate::models::{
        Category, CategoryCreate, CategoryUpdate, Comment, CommentCreate, CommentUpdate,
        Post, PostCreate, PostUpdate, Profile, ProfileCreate, ProfileUpdate, ReplyCreate,
        Role, RoleCreate, RoleUpdate, User, UserCreate, UserUpdate,
    };
    pub use crate::server::{AppState, build_router};
    pub use crate::store::MemoryStore;
}
