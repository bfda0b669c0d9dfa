#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use social_core::domain::User;
use social_core::store::{EntityStore, MemoryStore};

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn store() -> Arc<MemoryStore> {
    init_tracing();
    Arc::new(MemoryStore::new())
}

pub async fn seed_user(store: &MemoryStore, name: &str) -> Uuid {
    let user = User::new(name, format!("{name}@example.com"));
    let id = user.id;
    store.insert_user(user).await.unwrap();
    id
}
