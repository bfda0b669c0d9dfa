//! Ownership authorization guard.
//!
//! Pure decision functions: callers resolve the records (and, for comment
//! deletion, the parent post) and pass them in. Nothing here touches the
//! store.

use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::error::{ServiceError, ServiceResult};

/// Mutating action being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Update,
    Delete,
}

/// Guard verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Forbidden,
}

impl Decision {
    fn of(allowed: bool) -> Self {
        if allowed {
            Decision::Allowed
        } else {
            Decision::Forbidden
        }
    }

    /// Convert the verdict into a result, with `reason` as the error message.
    pub fn require(self, reason: &str) -> ServiceResult<()> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Forbidden => Err(ServiceError::Forbidden(reason.to_string())),
        }
    }
}

/// A post may be updated or deleted only by its author.
pub fn authorize_post(actor_id: Uuid, post: &Post, _action: Action) -> Decision {
    Decision::of(actor_id == post.author_id)
}

/// A comment may be updated only by its author. Deletion authority extends to
/// the author of the parent post. If the parent post cannot be resolved the
/// extended rule fails closed: ownership of the post cannot be proven.
pub fn authorize_comment(
    actor_id: Uuid,
    comment: &Comment,
    parent_post: Option<&Post>,
    action: Action,
) -> Decision {
    if actor_id == comment.user_id {
        return Decision::Allowed;
    }
    match action {
        Action::Update => Decision::Forbidden,
        Action::Delete => {
            Decision::of(parent_post.map_or(false, |post| actor_id == post.author_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(author_id: Uuid) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            image: None,
            author_id,
            n_comments: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn comment(user_id: Uuid, post_id: Uuid) -> Comment {
        let now = Utc::now();
        Comment {
            id: Uuid::new_v4(),
            description: "c".into(),
            user_id,
            post_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn post_mutation_is_author_only() {
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let p = post(author);

        assert_eq!(authorize_post(author, &p, Action::Update), Decision::Allowed);
        assert_eq!(authorize_post(author, &p, Action::Delete), Decision::Allowed);
        assert_eq!(
            authorize_post(stranger, &p, Action::Update),
            Decision::Forbidden
        );
        assert_eq!(
            authorize_post(stranger, &p, Action::Delete),
            Decision::Forbidden
        );
    }

    #[test]
    fn comment_update_is_author_only() {
        let commenter = Uuid::new_v4();
        let post_owner = Uuid::new_v4();
        let p = post(post_owner);
        let c = comment(commenter, p.id);

        assert_eq!(
            authorize_comment(commenter, &c, Some(&p), Action::Update),
            Decision::Allowed
        );
        // the post owner may delete comments on their post, but not edit them
        assert_eq!(
            authorize_comment(post_owner, &c, Some(&p), Action::Update),
            Decision::Forbidden
        );
    }

    #[test]
    fn comment_delete_extends_to_post_owner() {
        let commenter = Uuid::new_v4();
        let post_owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let p = post(post_owner);
        let c = comment(commenter, p.id);

        assert_eq!(
            authorize_comment(commenter, &c, Some(&p), Action::Delete),
            Decision::Allowed
        );
        assert_eq!(
            authorize_comment(post_owner, &c, Some(&p), Action::Delete),
            Decision::Allowed
        );
        assert_eq!(
            authorize_comment(stranger, &c, Some(&p), Action::Delete),
            Decision::Forbidden
        );
    }

    #[test]
    fn comment_delete_fails_closed_without_parent() {
        let commenter = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let c = comment(commenter, Uuid::new_v4());

        // parent post gone: only the comment author keeps delete rights
        assert_eq!(
            authorize_comment(claimant, &c, None, Action::Delete),
            Decision::Forbidden
        );
        assert_eq!(
            authorize_comment(commenter, &c, None, Action::Delete),
            Decision::Allowed
        );
    }

    #[test]
    fn require_maps_to_forbidden_error() {
        let err = Decision::Forbidden.require("no").unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(Decision::Allowed.require("no").is_ok());
    }
}
