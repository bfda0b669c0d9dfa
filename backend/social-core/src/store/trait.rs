use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Comment, Post, User};

/// Backend failure surfaced by an entity store. These are transient from the
/// caller's point of view (connection loss, malformed document) and are never
/// retried inside the core.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("document serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Relationship fields on a user record that support atomic set semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowField {
    Following,
    Followers,
}

/// Filter for post scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author_id: Option<Uuid>,
}

impl PostFilter {
    pub fn by_author(author_id: Uuid) -> Self {
        Self {
            author_id: Some(author_id),
        }
    }
}

/// Filter for comment scans, bulk deletes and grouped counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub post_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

impl CommentFilter {
    pub fn by_post(post_id: Uuid) -> Self {
        Self {
            post_id: Some(post_id),
            user_id: None,
        }
    }

    pub fn by_user(user_id: Uuid) -> Self {
        Self {
            post_id: None,
            user_id: Some(user_id),
        }
    }
}

/// Point update for a post record. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub n_comments: Option<i64>,
}

/// Point update for a comment record.
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    pub description: Option<String>,
}

/// Trait defining the entity store contract the core operates against.
///
/// Every method is an individually atomic single-record (or single-filter)
/// operation; nothing here is transactional across records. Set-add and
/// set-remove are idempotent: applying them to an already-present / absent
/// value is a no-op that returns `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EntityStore: Send + Sync {
    // ---- users ----

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn insert_user(&self, user: User) -> StoreResult<()>;

    /// Delete a user record; returns false if it was absent.
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;

    /// Atomically add `value` to a set-valued field on the user record.
    /// Returns true if the value was newly added. A missing record is a
    /// no-op returning false.
    async fn add_to_user_set(
        &self,
        id: Uuid,
        field: FollowField,
        value: Uuid,
    ) -> StoreResult<bool>;

    /// Atomically remove `value` from a set-valued field on the user record.
    /// Returns true if the value was present. A missing record is a no-op
    /// returning false.
    async fn remove_from_user_set(
        &self,
        id: Uuid,
        field: FollowField,
        value: Uuid,
    ) -> StoreResult<bool>;

    // ---- posts ----

    async fn get_post(&self, id: Uuid) -> StoreResult<Option<Post>>;

    async fn insert_post(&self, post: Post) -> StoreResult<()>;

    async fn find_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>>;

    /// Apply a point update; returns false if the record was absent.
    async fn update_post(&self, id: Uuid, patch: PostPatch) -> StoreResult<bool>;

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool>;

    // ---- comments ----

    async fn get_comment(&self, id: Uuid) -> StoreResult<Option<Comment>>;

    async fn insert_comment(&self, comment: Comment) -> StoreResult<()>;

    async fn find_comments(&self, filter: CommentFilter) -> StoreResult<Vec<Comment>>;

    async fn update_comment(&self, id: Uuid, patch: CommentPatch) -> StoreResult<bool>;

    async fn delete_comment(&self, id: Uuid) -> StoreResult<bool>;

    /// Bulk delete; returns the number of records removed.
    async fn delete_comments(&self, filter: CommentFilter) -> StoreResult<u64>;

    /// Aggregate count of matching comments grouped by `post_id`. Posts with
    /// no matching comments have no entry in the result.
    async fn count_comments_by_post(
        &self,
        filter: CommentFilter,
    ) -> StoreResult<HashMap<Uuid, u64>>;
}
