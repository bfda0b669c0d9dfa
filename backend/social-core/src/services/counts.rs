//! Comment-count recomputation engine.
//!
//! `Post.n_comments` is a derived cache. It is always rebuilt from the live
//! comment records - never incremented or decremented - so the write is
//! idempotent and converges to the correct value no matter how many
//! conflicting comment mutations raced before it ran.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::store::{CommentFilter, EntityStore, PostPatch};

#[derive(Clone)]
pub struct CommentCountService {
    store: Arc<dyn EntityStore>,
}

impl CommentCountService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Recount the live comments on `post_id` and persist the result.
    ///
    /// A missing post is a no-op, not an error: the post's own deletion is
    /// the cascade orchestrator's concern, and a recompute racing it simply
    /// has nothing left to update.
    pub async fn recompute(&self, post_id: Uuid) -> ServiceResult<()> {
        if self.store.get_post(post_id).await?.is_none() {
            debug!(%post_id, "skipping comment count recompute, post is gone");
            return Ok(());
        }

        let counts = self
            .store
            .count_comments_by_post(CommentFilter::by_post(post_id))
            .await?;
        let n_comments = counts.get(&post_id).copied().unwrap_or(0) as i64;

        // The post may have vanished between the read and this write; the
        // point update is then a no-op, as intended.
        self.store
            .update_post(
                post_id,
                PostPatch {
                    n_comments: Some(n_comments),
                    ..Default::default()
                },
            )
            .await?;

        debug!(%post_id, n_comments, "recomputed comment count");
        Ok(())
    }
}
