//! Follow-graph mutator.
//!
//! Maintains the paired `following`/`followers` sets on two user records.
//! The two edge writes are independent single-record operations; no lock is
//! held across them. A failure between the writes leaves a half-state that a
//! later retry converges out of, because both writes are idempotent set-adds
//! (or set-removes).

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::store::{EntityStore, FollowField};

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn EntityStore>,
}

impl FollowService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Make `actor_id` follow `target_id`.
    pub async fn follow(&self, actor_id: Uuid, target_id: Uuid) -> ServiceResult<()> {
        if actor_id == target_id {
            return Err(ServiceError::SelfFollow);
        }

        let actor = self
            .store
            .get_user(actor_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no user found with id {actor_id}")))?;
        if self.store.get_user(target_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "no user found with id {target_id}"
            )));
        }

        // The precondition reads the actor's own `following` set. The target's
        // `followers` set is maintained by the second write below and may
        // transiently disagree; it is never consulted here.
        if actor.following.contains(&target_id) {
            return Err(ServiceError::AlreadyFollowing);
        }

        self.store
            .add_to_user_set(actor_id, FollowField::Following, target_id)
            .await?;
        self.store
            .add_to_user_set(target_id, FollowField::Followers, actor_id)
            .await?;

        debug!(%actor_id, %target_id, "created follow edge");
        Ok(())
    }

    /// Make `actor_id` stop following `target_id`.
    pub async fn unfollow(&self, actor_id: Uuid, target_id: Uuid) -> ServiceResult<()> {
        let actor = self
            .store
            .get_user(actor_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no user found with id {actor_id}")))?;
        if self.store.get_user(target_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "no user found with id {target_id}"
            )));
        }

        if !actor.following.contains(&target_id) {
            return Err(ServiceError::NotFollowing);
        }

        self.store
            .remove_from_user_set(actor_id, FollowField::Following, target_id)
            .await?;
        self.store
            .remove_from_user_set(target_id, FollowField::Followers, actor_id)
            .await?;

        debug!(%actor_id, %target_id, "removed follow edge");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockEntityStore, StoreError};

    #[tokio::test]
    async fn store_failure_surfaces_unchanged() {
        let mut store = MockEntityStore::new();
        store
            .expect_get_user()
            .returning(|_| Err(StoreError::Backend("connection reset".into())));

        let service = FollowService::new(Arc::new(store));
        let err = service
            .follow(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Store(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn self_follow_short_circuits_before_any_store_call() {
        // no expectations set: any store call would panic the mock
        let store = MockEntityStore::new();
        let service = FollowService::new(Arc::new(store));

        let id = Uuid::new_v4();
        let err = service.follow(id, id).await.unwrap_err();
        assert!(matches!(err, ServiceError::SelfFollow));
    }
}
