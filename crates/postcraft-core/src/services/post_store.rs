//! Post store - the authoritative in-memory list of posts, mirrored to
//! durable storage on every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Post, PostStats, PostStatus};
use crate::error::StoreError;
use crate::ports::{PersistenceError, PostPersistence};

/// In-memory post collection kept consistent with its persisted snapshot.
///
/// Posts are ordered newest-created-first by `add`; nothing else reorders them.
/// Mutations hold the write lock across the persist call, so they are applied
/// one at a time and each sees the latest snapshot. A mutation only lands in
/// memory once the full new snapshot has been written.
pub struct PostStore {
    posts: RwLock<Vec<Post>>,
    persistence: Arc<dyn PostPersistence>,
}

impl PostStore {
    /// Hydrate the store from the persisted snapshot.
    pub async fn load(persistence: Arc<dyn PostPersistence>) -> Self {
        let posts = read_snapshot(persistence.as_ref()).await;
        Self {
            posts: RwLock::new(posts),
            persistence,
        }
    }

    pub async fn list(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    /// Prepend a post. Its id must not already be present.
    pub async fn add(&self, post: Post) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(StoreError::DuplicateId(post.id));
        }

        let id = post.id.clone();
        let mut next = Vec::with_capacity(posts.len() + 1);
        next.push(post);
        next.extend(posts.iter().cloned());

        self.commit(&mut posts, next).await?;
        tracing::debug!(post_id = %id, total = posts.len(), "Post added");
        Ok(())
    }

    /// Remove the post with `id`. Returns whether one was removed; a missing
    /// id is not an error and still re-persists the snapshot.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let next: Vec<Post> = posts.iter().filter(|p| p.id != id).cloned().collect();
        let removed = next.len() != posts.len();

        self.commit(&mut posts, next).await?;
        tracing::debug!(post_id = %id, removed, "Post remove");
        Ok(removed)
    }

    /// Replace only the `status` of the post with `id`.
    pub async fn update_status(&self, id: &str, status: PostStatus) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let mut found = false;
        let next: Vec<Post> = posts
            .iter()
            .map(|p| {
                if p.id == id {
                    found = true;
                    Post {
                        status,
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect();

        self.commit(&mut posts, next).await?;
        tracing::debug!(post_id = %id, %status, found, "Post status update");
        Ok(found)
    }

    /// Posts sorted by creation time, newest first.
    pub async fn calendar(&self) -> Vec<Post> {
        let mut posts = self.list().await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub async fn by_status(&self, status: PostStatus) -> Vec<Post> {
        self.posts
            .read()
            .await
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> PostStats {
        PostStats::from_posts(self.posts.read().await.iter())
    }

    /// Leading excerpts of the first `limit` posts, each cut to `max_chars` characters.
    pub async fn recent_excerpts(&self, limit: usize, max_chars: usize) -> Vec<String> {
        self.posts
            .read()
            .await
            .iter()
            .take(limit)
            .map(|p| p.content.chars().take(max_chars).collect())
            .collect()
    }

    async fn commit(&self, current: &mut Vec<Post>, next: Vec<Post>) -> Result<(), StoreError> {
        self.persistence.persist(&next).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist posts");
            StoreError::from(e)
        })?;
        *current = next;
        Ok(())
    }
}

/// Read failures never escape: a corrupt or unreadable snapshot yields an empty store.
async fn read_snapshot(persistence: &dyn PostPersistence) -> Vec<Post> {
    match persistence.load().await {
        Ok(posts) => {
            let posts = dedupe_ids(posts);
            tracing::info!(count = posts.len(), "Loaded posts from snapshot");
            posts
        }
        Err(PersistenceError::Corrupt(reason)) => {
            tracing::warn!(%reason, "Discarding corrupt post snapshot");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read post snapshot; starting empty");
            Vec::new()
        }
    }
}

/// Keep the first post for each id; older snapshots may repeat ids.
fn dedupe_ids(posts: Vec<Post>) -> Vec<Post> {
    let total = posts.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Post> = posts
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            dropped = total - unique.len(),
            "Dropped posts with duplicate ids from snapshot"
        );
    }
    unique
}
