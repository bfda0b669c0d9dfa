mod common;

use uuid::Uuid;

use social_core::error::ServiceError;
use social_core::services::FollowService;
use social_core::store::{EntityStore, FollowField};

#[tokio::test]
async fn follow_establishes_both_edges() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let b = common::seed_user(&store, "bob").await;
    let service = FollowService::new(store.clone());

    service.follow(a, b).await.unwrap();

    let alice = store.get_user(a).await.unwrap().unwrap();
    let bob = store.get_user(b).await.unwrap().unwrap();
    assert_eq!(alice.following, vec![b]);
    assert!(alice.followers.is_empty());
    assert_eq!(bob.followers, vec![a]);
    assert!(bob.following.is_empty());
}

#[tokio::test]
async fn duplicate_follow_is_rejected() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let b = common::seed_user(&store, "bob").await;
    let service = FollowService::new(store.clone());

    service.follow(a, b).await.unwrap();
    let err = service.follow(a, b).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyFollowing));

    // the edge sets are untouched by the rejected call
    let alice = store.get_user(a).await.unwrap().unwrap();
    let bob = store.get_user(b).await.unwrap().unwrap();
    assert_eq!(alice.following, vec![b]);
    assert_eq!(bob.followers, vec![a]);
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let service = FollowService::new(store.clone());

    let err = service.follow(a, a).await.unwrap_err();
    assert!(matches!(err, ServiceError::SelfFollow));

    let alice = store.get_user(a).await.unwrap().unwrap();
    assert!(alice.following.is_empty());
    assert!(alice.followers.is_empty());
}

#[tokio::test]
async fn follow_requires_both_users_to_exist() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let service = FollowService::new(store.clone());

    let err = service.follow(a, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = service.follow(Uuid::new_v4(), a).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn unfollow_without_follow_is_rejected() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let b = common::seed_user(&store, "bob").await;
    let service = FollowService::new(store.clone());

    let err = service.unfollow(a, b).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFollowing));
}

#[tokio::test]
async fn unfollow_removes_both_edges() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let b = common::seed_user(&store, "bob").await;
    let service = FollowService::new(store.clone());

    service.follow(a, b).await.unwrap();
    service.unfollow(a, b).await.unwrap();

    let alice = store.get_user(a).await.unwrap().unwrap();
    let bob = store.get_user(b).await.unwrap().unwrap();
    assert!(alice.following.is_empty());
    assert!(bob.followers.is_empty());

    // and the pair can follow again afterwards
    service.follow(a, b).await.unwrap();
    let alice = store.get_user(a).await.unwrap().unwrap();
    assert_eq!(alice.following, vec![b]);
}

#[tokio::test]
async fn already_following_reads_the_actor_side_only() {
    let store = common::store();
    let a = common::seed_user(&store, "alice").await;
    let b = common::seed_user(&store, "bob").await;
    let service = FollowService::new(store.clone());

    // half-state as if a previous follow died after its first write:
    // the actor's `following` edge exists, the target's `followers` does not
    store
        .add_to_user_set(a, FollowField::Following, b)
        .await
        .unwrap();

    let err = service.follow(a, b).await.unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyFollowing));

    // opposite half-state: only the target's `followers` edge exists; the
    // precondition ignores it and the follow goes through, the duplicate
    // followers add being a no-op
    let c = common::seed_user(&store, "carol").await;
    let d = common::seed_user(&store, "dave").await;
    store
        .add_to_user_set(d, FollowField::Followers, c)
        .await
        .unwrap();

    service.follow(c, d).await.unwrap();
    let carol = store.get_user(c).await.unwrap().unwrap();
    let dave = store.get_user(d).await.unwrap().unwrap();
    assert_eq!(carol.following, vec![d]);
    assert_eq!(dave.followers, vec![c]);
}
