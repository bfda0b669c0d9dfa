//! Post creation and update. Thin: validation, ownership guard, point writes.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::{ServiceError, ServiceResult};
use crate::services::authorization::{authorize_post, Action};
use crate::store::{EntityStore, PostPatch};

/// Fields accepted when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// Fields a post author may change. The author itself is immutable, and
/// `n_comments` is owned by the recomputation engine.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn EntityStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create_post(&self, author_id: Uuid, new_post: NewPost) -> ServiceResult<Post> {
        if new_post.title.trim().is_empty() {
            return Err(ServiceError::Validation("title is required".into()));
        }
        if new_post.description.trim().is_empty() {
            return Err(ServiceError::Validation(
                "post description is required".into(),
            ));
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new_post.title,
            description: new_post.description,
            image: new_post.image,
            author_id,
            n_comments: 0,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_post(post.clone()).await?;
        Ok(post)
    }

    pub async fn update_post(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        update: PostUpdate,
    ) -> ServiceResult<Post> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no post found with id {post_id}")))?;
        authorize_post(actor_id, &post, Action::Update)
            .require("you are not allowed to update this post")?;

        self.store
            .update_post(
                post_id,
                PostPatch {
                    title: update.title,
                    description: update.description,
                    image: update.image,
                    n_comments: None,
                },
            )
            .await?;

        self.store
            .get_post(post_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no post found with id {post_id}")))
    }
}
