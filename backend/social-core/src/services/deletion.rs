//! Cascade deletion orchestrator.
//!
//! Deleting a post removes its comments; deleting a user removes their posts
//! (with those posts' comments), their comments on other users' posts, and
//! finally the user record. Each step is an independent single-record or
//! single-filter store write - there is no cross-record transaction, and a
//! partial cascade is repaired by re-running the operation.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::services::authorization::{authorize_comment, authorize_post, Action};
use crate::services::counts::CommentCountService;
use crate::store::{CommentFilter, EntityStore, PostFilter};

#[derive(Clone)]
pub struct DeletionService {
    store: Arc<dyn EntityStore>,
    counts: CommentCountService,
}

impl DeletionService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let counts = CommentCountService::new(store.clone());
        Self { store, counts }
    }

    /// Delete a post and every comment referencing it.
    ///
    /// No per-comment recompute runs: the post carrying the counter is gone.
    pub async fn delete_post(&self, actor_id: Uuid, post_id: Uuid) -> ServiceResult<()> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no post found with id {post_id}")))?;
        authorize_post(actor_id, &post, Action::Delete)
            .require("you are not allowed to delete this post")?;

        self.store.delete_post(post_id).await?;
        let removed = self
            .store
            .delete_comments(CommentFilter::by_post(post_id))
            .await?;

        info!(%post_id, comments_removed = removed, "deleted post");
        Ok(())
    }

    /// Delete a single comment and recompute its post's comment count.
    ///
    /// Deletion authority extends to the parent post's author; a missing
    /// parent fails closed for anyone but the comment's own author.
    pub async fn delete_comment(&self, actor_id: Uuid, comment_id: Uuid) -> ServiceResult<()> {
        let comment = self.store.get_comment(comment_id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("no comment found with id {comment_id}"))
        })?;
        let parent = self.store.get_post(comment.post_id).await?;
        authorize_comment(actor_id, &comment, parent.as_ref(), Action::Delete)
            .require("you are not allowed to delete this comment")?;

        // post id captured before the delete; the recompute itself runs after
        // the delete is committed and counts fresh
        let post_id = comment.post_id;
        self.store.delete_comment(comment_id).await?;
        self.counts.recompute(post_id).await?;

        info!(%comment_id, %post_id, "deleted comment");
        Ok(())
    }

    /// Delete a user account and everything that depends on it:
    /// the user's posts (each cascading its comments, whoever wrote them),
    /// the user's comments on other users' posts (recomputing each affected
    /// post's count), and finally the user record.
    ///
    /// The user's id is deliberately left behind in other users'
    /// `following`/`followers` sets; dangling entries are skipped at read
    /// time (see `QueryService::follow_lists`).
    pub async fn delete_user_account(&self, user_id: Uuid) -> ServiceResult<()> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "no user found with id {user_id}"
            )));
        }

        let posts = self.store.find_posts(PostFilter::by_author(user_id)).await?;
        for post in &posts {
            self.store.delete_post(post.id).await?;
            self.store
                .delete_comments(CommentFilter::by_post(post.id))
                .await?;
        }

        // The user's own posts (and every comment on them) are gone, so what
        // remains under this author are comments on other users' posts.
        let foreign_comments = self
            .store
            .find_comments(CommentFilter::by_user(user_id))
            .await?;
        let affected_posts: HashSet<Uuid> =
            foreign_comments.iter().map(|c| c.post_id).collect();

        self.store
            .delete_comments(CommentFilter::by_user(user_id))
            .await?;
        for post_id in &affected_posts {
            self.counts.recompute(*post_id).await?;
        }

        self.store.delete_user(user_id).await?;

        info!(
            %user_id,
            posts_removed = posts.len(),
            foreign_comments_removed = foreign_comments.len(),
            "deleted user account"
        );
        Ok(())
    }
}
