//! Read-side composition.
//!
//! Author joins are explicit lookups performed here, not side effects of
//! storage access. A referenced user that no longer exists shows up as a
//! missing author (or is skipped in follow lists) rather than being silently
//! repaired - deleted accounts leave their id behind in other records.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::{ServiceError, ServiceResult};
use crate::store::{CommentFilter, EntityStore};

/// A comment joined with its author, when the author still exists.
#[derive(Debug, Clone, Serialize)]
pub struct CommentDetail {
    pub comment: Comment,
    pub author: Option<User>,
}

/// A post joined with its author and its comments.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub author: Option<User>,
    pub comments: Vec<CommentDetail>,
}

/// Both sides of a user's follow graph, resolved to live users.
#[derive(Debug, Clone, Serialize)]
pub struct FollowLists {
    pub following: Vec<User>,
    pub followers: Vec<User>,
}

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn EntityStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Fetch a post with its author and comments joined in.
    pub async fn get_post_detail(&self, post_id: Uuid) -> ServiceResult<PostDetail> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no post found with id {post_id}")))?;
        let author = self.store.get_user(post.author_id).await?;

        let comments = self
            .store
            .find_comments(CommentFilter::by_post(post_id))
            .await?;

        // memoize author lookups across comments
        let mut authors: HashMap<Uuid, Option<User>> = HashMap::new();
        let mut details = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = match authors.get(&comment.user_id) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = self.store.get_user(comment.user_id).await?;
                    authors.insert(comment.user_id, fetched.clone());
                    fetched
                }
            };
            details.push(CommentDetail { comment, author });
        }

        Ok(PostDetail {
            post,
            author,
            comments: details,
        })
    }

    /// Resolve a user's `following`/`followers` ids to live user records.
    /// Ids pointing at deleted accounts are skipped.
    pub async fn follow_lists(&self, user_id: Uuid) -> ServiceResult<FollowLists> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no user found with id {user_id}")))?;

        let mut following = Vec::with_capacity(user.following.len());
        for id in &user.following {
            if let Some(found) = self.store.get_user(*id).await? {
                following.push(found);
            }
        }

        let mut followers = Vec::with_capacity(user.followers.len());
        for id in &user.followers {
            if let Some(found) = self.store.get_user(*id).await? {
                followers.push(found);
            }
        }

        Ok(FollowLists {
            following,
            followers,
        })
    }
}
