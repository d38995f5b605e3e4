use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::{Post, PostFields};
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::ServiceError;
use crate::metrics;
use crate::posts::repository::PostRepository;
use crate::storage::json_list_store::{JsonListStore, LoadPolicy};

/// File-backed post store.
///
/// Every operation reloads the backing file; every mutation rewrites it in
/// full. Mutations through the same `PostStore` are serialized, but nothing
/// guards against another process writing the same file.
pub struct PostStore {
    file: JsonListStore<Post>,
    write_lock: Mutex<()>,
}

/// `1` for an empty store, otherwise one past the largest id. Deleted ids are
/// never handed out again because only the maximum matters.
pub fn next_id(posts: &[Post]) -> u64 {
    posts
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

impl PostStore {
    pub fn new<P: Into<PathBuf>>(path: P, policy: LoadPolicy) -> Self {
        Self { file: JsonListStore::new(path, policy), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn load(&self) -> Result<Vec<Post>, ServiceError> {
        self.file.load().await
    }

    pub async fn save(&self, posts: &[Post]) -> Result<(), ServiceError> {
        self.file.save(posts).await
    }

    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        self.load().await
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Post>, ServiceError> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    pub async fn create(&self, fields: PostFields) -> Result<Post, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let id = next_id(&posts);
        if posts.iter().any(|p| p.id == id) {
            return Err(ServiceError::IdSpaceExhausted);
        }
        let post = Post::from_fields(id, fields);
        posts.push(post.clone());
        self.save(&posts).await?;
        metrics::POSTS_CREATED_TOTAL.inc();
        info!(post_id = id, "post created");
        Ok(post)
    }

    pub async fn update(&self, id: u64, fields: PostFields) -> Result<Option<Post>, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.apply(fields);
        let updated = post.clone();
        self.save(&posts).await?;
        metrics::POSTS_UPDATED_TOTAL.inc();
        info!(post_id = id, "post updated");
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        self.save(&posts).await?;
        if posts.len() < before {
            metrics::POSTS_DELETED_TOTAL.inc();
            info!(post_id = id, "post deleted");
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn list(&self) -> Result<Vec<Post>, ServiceError> { self.list().await }
    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, ServiceError> { self.find_by_id(id).await }
    async fn create(&self, fields: PostFields) -> Result<Post, ServiceError> { self.create(fields).await }
    async fn update(&self, id: u64, fields: PostFields) -> Result<Option<Post>, ServiceError> { self.update(id, fields).await }
    async fn delete(&self, id: u64) -> Result<(), ServiceError> { self.delete(id).await }
}
