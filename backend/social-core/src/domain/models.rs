use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account holding both sides of the follow graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    /// Ids of users this user follows. Invariant: never contains `id`.
    pub following: Vec<Uuid>,
    /// Ids of users following this user. Invariant: never contains `id`.
    pub followers: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            image: None,
            following: Vec::new(),
            followers: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    /// Author of the post. Immutable after creation.
    pub author_id: Uuid,
    /// Derived cache of the number of comments on this post. Never
    /// authoritative: always recomputable from the comment records.
    pub n_comments: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity - a comment by a user on a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub description: String,
    /// Comment author. Immutable after creation.
    pub user_id: Uuid,
    /// Parent post. Immutable after creation.
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
