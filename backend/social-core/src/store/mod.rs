mod memory;
mod r#trait;

pub use memory::MemoryStore;
pub use r#trait::{
    CommentFilter, CommentPatch, EntityStore, FollowField, PostFilter, PostPatch, StoreError,
    StoreResult,
};

#[cfg(test)]
pub use r#trait::MockEntityStore;
