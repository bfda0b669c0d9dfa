use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Comment, Post, User};

use super::r#trait::{
    CommentFilter, CommentPatch, EntityStore, FollowField, PostFilter, PostPatch, StoreResult,
};

#[derive(Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

/// In-memory entity store.
///
/// The whole collection set sits under a single `RwLock`, which makes every
/// store call atomic with respect to every other call - the same per-call
/// guarantee a document database gives, and no more. Callers still get no
/// cross-call ordering.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn comment_matches(comment: &Comment, filter: &CommentFilter) -> bool {
    filter.post_id.map_or(true, |p| comment.post_id == p)
        && filter.user_id.map_or(true, |u| comment.user_id == u)
}

#[async_trait::async_trait]
impl EntityStore for MemoryStore {
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: User) -> StoreResult<()> {
        self.inner.write().await.users.insert(user.id, user);
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }

    async fn add_to_user_set(
        &self,
        id: Uuid,
        field: FollowField,
        value: Uuid,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(false);
        };
        let set = match field {
            FollowField::Following => &mut user.following,
            FollowField::Followers => &mut user.followers,
        };
        if set.contains(&value) {
            return Ok(false);
        }
        set.push(value);
        Ok(true)
    }

    async fn remove_from_user_set(
        &self,
        id: Uuid,
        field: FollowField,
        value: Uuid,
    ) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(false);
        };
        let set = match field {
            FollowField::Following => &mut user.following,
            FollowField::Followers => &mut user.followers,
        };
        let before = set.len();
        set.retain(|v| *v != value);
        Ok(set.len() < before)
    }

    async fn get_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn insert_post(&self, post: Post) -> StoreResult<()> {
        self.inner.write().await.posts.insert(post.id, post);
        Ok(())
    }

    async fn find_posts(&self, filter: PostFilter) -> StoreResult<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .values()
            .filter(|p| filter.author_id.map_or(true, |a| p.author_id == a))
            .cloned()
            .collect())
    }

    async fn update_post(&self, id: Uuid, patch: PostPatch) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.posts.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(description) = patch.description {
            post.description = description;
        }
        if let Some(image) = patch.image {
            post.image = Some(image);
        }
        if let Some(n_comments) = patch.n_comments {
            post.n_comments = n_comments;
        }
        post.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }

    async fn get_comment(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        Ok(self.inner.read().await.comments.get(&id).cloned())
    }

    async fn insert_comment(&self, comment: Comment) -> StoreResult<()> {
        self.inner.write().await.comments.insert(comment.id, comment);
        Ok(())
    }

    async fn find_comments(&self, filter: CommentFilter) -> StoreResult<Vec<Comment>> {
        let inner = self.inner.read().await;
        Ok(inner
            .comments
            .values()
            .filter(|c| comment_matches(c, &filter))
            .cloned()
            .collect())
    }

    async fn update_comment(&self, id: Uuid, patch: CommentPatch) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(comment) = inner.comments.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(description) = patch.description {
            comment.description = description;
        }
        comment.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_comment(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().await.comments.remove(&id).is_some())
    }

    async fn delete_comments(&self, filter: CommentFilter) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.comments.len();
        inner.comments.retain(|_, c| !comment_matches(c, &filter));
        Ok((before - inner.comments.len()) as u64)
    }

    async fn count_comments_by_post(
        &self,
        filter: CommentFilter,
    ) -> StoreResult<HashMap<Uuid, u64>> {
        let inner = self.inner.read().await;
        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for comment in inner.comments.values() {
            if comment_matches(comment, &filter) {
                *counts.entry(comment.post_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
