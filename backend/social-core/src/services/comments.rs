//! Comment creation and update.
//!
//! Every mutation here ends with an explicit call into the recomputation
//! engine - there are no implicit persistence hooks, so the count trigger is
//! visible in the control flow.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::Comment;
use crate::error::{ServiceError, ServiceResult};
use crate::services::authorization::{authorize_comment, Action};
use crate::services::counts::CommentCountService;
use crate::store::{CommentPatch, EntityStore};

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn EntityStore>,
    counts: CommentCountService,
}

impl CommentService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let counts = CommentCountService::new(store.clone());
        Self { store, counts }
    }

    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        description: impl Into<String>,
    ) -> ServiceResult<Comment> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ServiceError::Validation(
                "comment description is required".into(),
            ));
        }
        if self.store.get_post(post_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "no post found with id {post_id}"
            )));
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            description,
            user_id,
            post_id,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_comment(comment.clone()).await?;
        self.counts.recompute(post_id).await?;
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
        description: impl Into<String>,
    ) -> ServiceResult<Comment> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ServiceError::Validation(
                "comment description is required".into(),
            ));
        }

        let comment = self.store.get_comment(comment_id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("no comment found with id {comment_id}"))
        })?;
        authorize_comment(actor_id, &comment, None, Action::Update)
            .require("you are not allowed to update this comment")?;

        self.store
            .update_comment(
                comment_id,
                CommentPatch {
                    description: Some(description),
                },
            )
            .await?;

        // The post association is immutable, so this recompute targets the
        // unchanged post. Kept as a defensive trigger: the count converges
        // even if a racing mutation got there first.
        self.counts.recompute(comment.post_id).await?;

        self.store.get_comment(comment_id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("no comment found with id {comment_id}"))
        })
    }
}
