//! Shared application state handed to every request handler

use std::sync::Arc;

use crate::controllers::{
    CategoryController, CommentController, PostController, ProfileController, RoleController,
    UserController,
};
use crate::core::password::Argon2Hasher;
use crate::store::MemoryStore;

/// One controller per entity, all over the same store
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserController>,
    pub posts: Arc<PostController>,
    pub comments: Arc<CommentController>,
    pub categories: Arc<CategoryController>,
    pub profiles: Arc<ProfileController>,
    pub roles: Arc<RoleController>,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        let hasher = Arc::new(Argon2Hasher::new());
        Self {
            users: Arc::new(UserController::new(store.clone(), hasher)),
            posts: Arc::new(PostController::new(store.clone())),
            comments: Arc::new(CommentController::new(store.clone())),
            categories: Arc::new(CategoryController::new(store.clone())),
            profiles: Arc::new(ProfileController::new(store.clone())),
            roles: Arc::new(RoleController::new(store)),
        }
    }
}
