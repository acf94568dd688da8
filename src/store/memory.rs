//! In-memory datastore
//!
//! A single `RwLock<DbState>` guards all tables, so every operation —
//! including a multi-table cascade — publishes atomically. Tables are
//! `IndexMap`s keyed by id: iteration order is insertion order, which keeps
//! unordered pagination deterministic.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use indexmap::IndexMap;

use crate::core::record::Record;
use crate::models::{
    Category, Comment, Post, PostCategory, Profile, Role, RoleAssignment, User,
};
use crate::store::{StoreError, StoreResult};

/// One entity table: rows in insertion order plus the id sequence
#[derive(Debug)]
pub struct Table<T> {
    rows: IndexMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: IndexMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// The complete database state, guarded by one lock
#[derive(Debug, Default)]
pub struct DbState {
    users: Table<User>,
    posts: Table<Post>,
    comments: Table<Comment>,
    categories: Table<Category>,
    profiles: Table<Profile>,
    roles: Table<Role>,
    post_categories: Vec<PostCategory>,
    role_assignments: Vec<RoleAssignment>,
}

/// A record type with a table in [`DbState`].
///
/// `delete_dependents` removes everything the record owns before the record
/// itself goes away: grandchildren first, then children, then (in the
/// caller) the parent row — all inside the same write lock.
pub trait Stored: Record {
    fn table(state: &DbState) -> &Table<Self>;
    fn table_mut(state: &mut DbState) -> &mut Table<Self>;

    fn delete_dependents(state: &mut DbState, id: i64) {
        let _ = (state, id);
    }
}

impl Stored for User {
    fn table(state: &DbState) -> &Table<Self> {
        &state.users
    }

    fn table_mut(state: &mut DbState) -> &mut Table<Self> {
        &mut state.users
    }

    fn delete_dependents(state: &mut DbState, id: i64) {
        // The user's posts, each cascading to its own comments and
        // category pairings.
        let post_ids: Vec<i64> = state
            .posts
            .rows
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in post_ids {
            Post::delete_dependents(state, post_id);
            state.posts.rows.shift_remove(&post_id);
        }

        // Comments the user left on other people's posts, with their
        // reply subtrees.
        let comment_ids: Vec<i64> = state
            .comments
            .rows
            .values()
            .filter(|c| c.user_id == id)
            .map(|c| c.id)
            .collect();
        for comment_id in comment_ids {
            if state.comments.rows.contains_key(&comment_id) {
                delete_reply_subtree(state, comment_id);
                state.comments.rows.shift_remove(&comment_id);
            }
        }

        let profile_ids: Vec<i64> = state
            .profiles
            .rows
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        for profile_id in profile_ids {
            state.profiles.rows.shift_remove(&profile_id);
        }

        state.role_assignments.retain(|a| a.user_id != id);
    }
}

impl Stored for Post {
    fn table(state: &DbState) -> &Table<Self> {
        &state.posts
    }

    fn table_mut(state: &mut DbState) -> &mut Table<Self> {
        &mut state.posts
    }

    fn delete_dependents(state: &mut DbState, id: i64) {
        // Every comment on the post goes, reply trees included, since a
        // reply always sits on the same post as its parent.
        state.comments.rows.retain(|_, c| c.post_id != id);
        state.post_categories.retain(|pc| pc.post_id != id);
    }
}

impl Stored for Comment {
    fn table(state: &DbState) -> &Table<Self> {
        &state.comments
    }

    fn table_mut(state: &mut DbState) -> &mut Table<Self> {
        &mut state.comments
    }

    fn delete_dependents(state: &mut DbState, id: i64) {
        delete_reply_subtree(state, id);
    }
}

impl Stored for Category {
    fn table(state: &DbState) -> &Table<Self> {
        &state.categories
    }

    fn table_mut(state: &mut DbState) -> &mut Table<Self> {
        &mut state.categories
    }

    fn delete_dependents(state: &mut DbState, id: i64) {
        state.post_categories.retain(|pc| pc.category_id != id);
    }
}

impl Stored for Profile {
    fn table(state: &DbState) -> &Table<Self> {
        &state.profiles
    }

    fn table_mut(state: &mut DbState) -> &mut Table<Self> {
        &mut state.profiles
    }
}

impl Stored for Role {
    fn table(state: &DbState) -> &Table<Self> {
        &state.roles
    }

    fn table_mut(state: &mut DbState) -> &mut Table<Self> {
        &mut state.roles
    }

    fn delete_dependents(state: &mut DbState, id: i64) {
        state.role_assignments.retain(|a| a.role_id != id);
    }
}

/// Remove all replies under `parent_id`, deepest level first
fn delete_reply_subtree(state: &mut DbState, parent_id: i64) {
    let children: Vec<i64> = state
        .comments
        .rows
        .values()
        .filter(|c| c.parent_id == Some(parent_id))
        .map(|c| c.id)
        .collect();
    for child_id in children {
        delete_reply_subtree(state, child_id);
        state.comments.rows.shift_remove(&child_id);
    }
}

/// Thread-safe in-memory datastore; cheap to clone and share
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<DbState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, DbState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, DbState>> {
        self.state
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    // === Generic record operations ===

    /// Insert a record: assigns the next sequential id and the creation
    /// timestamp, then publishes the row
    pub fn insert<T: Stored>(&self, mut record: T) -> StoreResult<T> {
        let mut state = self.write()?;
        let table = T::table_mut(&mut state);
        let id = table.allocate_id();
        record.set_id(id);
        record.stamp_created(Utc::now());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    /// Fetch a record by id
    pub fn fetch<T: Stored>(&self, id: i64) -> StoreResult<Option<T>> {
        let state = self.read()?;
        Ok(T::table(&state).rows.get(&id).cloned())
    }

    /// All records of a type, in insertion order
    pub fn list<T: Stored>(&self) -> StoreResult<Vec<T>> {
        let state = self.read()?;
        Ok(T::table(&state).rows.values().cloned().collect())
    }

    /// Replace an existing row, stamping the modification timestamp
    pub fn replace<T: Stored>(&self, mut record: T) -> StoreResult<T> {
        let mut state = self.write()?;
        let table = T::table_mut(&mut state);
        if !table.rows.contains_key(&record.id()) {
            return Err(StoreError::RowMissing {
                resource: T::resource_name(),
                id: record.id(),
            });
        }
        record.touch(Utc::now());
        table.rows.insert(record.id(), record.clone());
        Ok(record)
    }

    /// Remove a record and everything it owns, dependents first, in one
    /// unit of work. Returns the removed record, or `None` if absent.
    pub fn remove<T: Stored>(&self, id: i64) -> StoreResult<Option<T>> {
        let mut state = self.write()?;
        let Some(record) = T::table(&state).rows.get(&id).cloned() else {
            return Ok(None);
        };
        T::delete_dependents(&mut state, id);
        T::table_mut(&mut state).rows.shift_remove(&id);
        Ok(Some(record))
    }

    /// Check whether a row exists
    pub fn contains<T: Stored>(&self, id: i64) -> StoreResult<bool> {
        let state = self.read()?;
        Ok(T::table(&state).rows.contains_key(&id))
    }

    // === Post/category association ===

    pub fn post_category_exists(&self, post_id: i64, category_id: i64) -> StoreResult<bool> {
        let state = self.read()?;
        Ok(state
            .post_categories
            .iter()
            .any(|pc| pc.post_id == post_id && pc.category_id == category_id))
    }

    pub fn link_post_category(&self, post_id: i64, category_id: i64) -> StoreResult<PostCategory> {
        let mut state = self.write()?;
        let row = PostCategory {
            post_id,
            category_id,
            created_at: Utc::now(),
        };
        state.post_categories.push(row.clone());
        Ok(row)
    }

    /// Remove a post/category pairing; reports whether a row was removed
    pub fn unlink_post_category(&self, post_id: i64, category_id: i64) -> StoreResult<bool> {
        let mut state = self.write()?;
        let before = state.post_categories.len();
        state
            .post_categories
            .retain(|pc| !(pc.post_id == post_id && pc.category_id == category_id));
        Ok(state.post_categories.len() < before)
    }

    pub fn categories_of_post(&self, post_id: i64) -> StoreResult<Vec<Category>> {
        let state = self.read()?;
        Ok(state
            .post_categories
            .iter()
            .filter(|pc| pc.post_id == post_id)
            .filter_map(|pc| state.categories.rows.get(&pc.category_id).cloned())
            .collect())
    }

    pub fn posts_in_category(&self, category_id: i64) -> StoreResult<Vec<Post>> {
        let state = self.read()?;
        Ok(state
            .post_categories
            .iter()
            .filter(|pc| pc.category_id == category_id)
            .filter_map(|pc| state.posts.rows.get(&pc.post_id).cloned())
            .collect())
    }

    /// Every category paired with its post count, in insertion order
    pub fn category_post_counts(&self) -> StoreResult<Vec<(Category, usize)>> {
        let state = self.read()?;
        Ok(state
            .categories
            .rows
            .values()
            .map(|category| {
                let count = state
                    .post_categories
                    .iter()
                    .filter(|pc| pc.category_id == category.id)
                    .count();
                (category.clone(), count)
            })
            .collect())
    }

    // === User/role association ===

    pub fn role_assignment_exists(&self, user_id: i64, role_id: i64) -> StoreResult<bool> {
        let state = self.read()?;
        Ok(state
            .role_assignments
            .iter()
            .any(|a| a.user_id == user_id && a.role_id == role_id))
    }

    pub fn assign_role(&self, user_id: i64, role_id: i64) -> StoreResult<RoleAssignment> {
        let mut state = self.write()?;
        let row = RoleAssignment {
            user_id,
            role_id,
            created_at: Utc::now(),
        };
        state.role_assignments.push(row.clone());
        Ok(row)
    }

    /// Remove a user/role pairing; reports whether a row was removed
    pub fn unassign_role(&self, user_id: i64, role_id: i64) -> StoreResult<bool> {
        let mut state = self.write()?;
        let before = state.role_assignments.len();
        state
            .role_assignments
            .retain(|a| !(a.user_id == user_id && a.role_id == role_id));
        Ok(state.role_assignments.len() < before)
    }

    pub fn roles_of_user(&self, user_id: i64) -> StoreResult<Vec<Role>> {
        let state = self.read()?;
        Ok(state
            .role_assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| state.roles.rows.get(&a.role_id).cloned())
            .collect())
    }

    pub fn users_with_role(&self, role_id: i64) -> StoreResult<Vec<User>> {
        let state = self.read()?;
        Ok(state
            .role_assignments
            .iter()
            .filter(|a| a.role_id == role_id)
            .filter_map(|a| state.users.rows.get(&a.user_id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(n: u32) -> User {
        User::new(
            format!("user{n}@example.com"),
            format!("user{n}"),
            "hash".to_string(),
            true,
        )
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert(user(1)).unwrap();
        let second = store.insert(user(2)).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        // Sequences are per table.
        let post = store.insert(Post::new("T".into(), "C".into(), 1)).unwrap();
        assert_eq!(post.id, 1);
    }

    #[test]
    fn test_replace_touches_updated_at() {
        let store = MemoryStore::new();
        let mut u = store.insert(user(1)).unwrap();
        assert!(u.updated_at.is_none());

        u.username = "renamed".to_string();
        let updated = store.replace(u).unwrap();
        assert!(updated.updated_at.is_some());
        assert_eq!(
            store.fetch::<User>(1).unwrap().unwrap().username,
            "renamed"
        );
    }

    #[test]
    fn test_replace_missing_row() {
        let store = MemoryStore::new();
        let mut ghost = user(1);
        ghost.id = 99;
        assert!(matches!(
            store.replace(ghost),
            Err(StoreError::RowMissing { id: 99, .. })
        ));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.remove::<User>(1).unwrap().is_none());
    }

    #[test]
    fn test_post_delete_cascades_comments_and_pairings() {
        let store = MemoryStore::new();
        let author = store.insert(user(1)).unwrap();
        let post = store
            .insert(Post::new("T".into(), "C".into(), author.id))
            .unwrap();
        let cat = store.insert(Category::new("rust".into(), None)).unwrap();
        store.link_post_category(post.id, cat.id).unwrap();
        store
            .insert(Comment::new("hi".into(), author.id, post.id, None))
            .unwrap();

        store.remove::<Post>(post.id).unwrap();

        assert!(store.list::<Comment>().unwrap().is_empty());
        assert!(!store.post_category_exists(post.id, cat.id).unwrap());
        // The category itself survives.
        assert!(store.contains::<Category>(cat.id).unwrap());
    }

    #[test]
    fn test_comment_delete_removes_whole_subtree() {
        let store = MemoryStore::new();
        let author = store.insert(user(1)).unwrap();
        let post = store
            .insert(Post::new("T".into(), "C".into(), author.id))
            .unwrap();
        let root = store
            .insert(Comment::new("root".into(), author.id, post.id, None))
            .unwrap();
        let child = store
            .insert(Comment::new(
                "child".into(),
                author.id,
                post.id,
                Some(root.id),
            ))
            .unwrap();
        let grandchild = store
            .insert(Comment::new(
                "grandchild".into(),
                author.id,
                post.id,
                Some(child.id),
            ))
            .unwrap();
        let sibling = store
            .insert(Comment::new("other".into(), author.id, post.id, None))
            .unwrap();

        store.remove::<Comment>(root.id).unwrap();

        assert!(!store.contains::<Comment>(child.id).unwrap());
        assert!(!store.contains::<Comment>(grandchild.id).unwrap());
        assert!(store.contains::<Comment>(sibling.id).unwrap());
    }

    #[test]
    fn test_user_delete_cascades_everything_owned() {
        let store = MemoryStore::new();
        let alice = store.insert(user(1)).unwrap();
        let bob = store.insert(user(2)).unwrap();

        let alice_post = store
            .insert(Post::new("A".into(), "body".into(), alice.id))
            .unwrap();
        let bob_post = store
            .insert(Post::new("B".into(), "body".into(), bob.id))
            .unwrap();

        // Bob comments on Alice's post; Alice comments on Bob's post and
        // Bob replies to her there.
        store
            .insert(Comment::new("bob says".into(), bob.id, alice_post.id, None))
            .unwrap();
        let alice_comment = store
            .insert(Comment::new(
                "alice says".into(),
                alice.id,
                bob_post.id,
                None,
            ))
            .unwrap();
        let bob_reply = store
            .insert(Comment::new(
                "bob replies".into(),
                bob.id,
                bob_post.id,
                Some(alice_comment.id),
            ))
            .unwrap();

        store
            .insert(Profile::new(alice.id, Some("bio".into()), None, None, None))
            .unwrap();
        let role = store.insert(Role::new("admin".into(), None)).unwrap();
        store.assign_role(alice.id, role.id).unwrap();

        store.remove::<User>(alice.id).unwrap();

        // Alice's post went, along with Bob's comment on it.
        assert!(!store.contains::<Post>(alice_post.id).unwrap());
        // Alice's comment on Bob's post went, taking Bob's reply with it.
        assert!(!store.contains::<Comment>(alice_comment.id).unwrap());
        assert!(!store.contains::<Comment>(bob_reply.id).unwrap());
        assert!(store.list::<Comment>().unwrap().is_empty());
        // Profile and role assignment are gone; the role itself survives.
        assert!(store.list::<Profile>().unwrap().is_empty());
        assert!(!store.role_assignment_exists(alice.id, role.id).unwrap());
        assert!(store.contains::<Role>(role.id).unwrap());
        // Bob's post is untouched.
        assert!(store.contains::<Post>(bob_post.id).unwrap());
    }

    #[test]
    fn test_unassign_role_reports_removal() {
        let store = MemoryStore::new();
        store.assign_role(1, 1).unwrap();
        assert!(store.unassign_role(1, 1).unwrap());
        assert!(!store.unassign_role(1, 1).unwrap());
    }

    #[test]
    fn test_category_post_counts() {
        let store = MemoryStore::new();
        let author = store.insert(user(1)).unwrap();
        let rust = store.insert(Category::new("rust".into(), None)).unwrap();
        let web = store.insert(Category::new("web".into(), None)).unwrap();
        store.insert(Category::new("empty".into(), None)).unwrap();

        for n in 0..3 {
            let post = store
                .insert(Post::new(format!("p{n}"), "body".into(), author.id))
                .unwrap();
            store.link_post_category(post.id, rust.id).unwrap();
            if n == 0 {
                store.link_post_category(post.id, web.id).unwrap();
            }
        }

        let counts = store.category_post_counts().unwrap();
        assert_eq!(counts.len(), 3);
        let by_name: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(c, n)| (c.name, n))
            .collect();
        assert!(by_name.contains(&("rust".to_string(), 3)));
        assert!(by_name.contains(&("web".to_string(), 1)));
        assert!(by_name.contains(&("empty".to_string(), 0)));
    }
}
