use async_trait::async_trait;
use models::{Post, PostFields};

use crate::errors::ServiceError;

/// Trait abstraction for post storage.
/// The HTTP layer only sees this; `PostStore` is the file-backed implementation.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Post>, ServiceError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<Post>, ServiceError>;
    async fn create(&self, fields: PostFields) -> Result<Post, ServiceError>;
    /// `Ok(None)` when no post has `id`; nothing is written in that case.
    async fn update(&self, id: u64, fields: PostFields) -> Result<Option<Post>, ServiceError>;
    /// Unknown ids are not an error.
    async fn delete(&self, id: u64) -> Result<(), ServiceError>;

    /// Like `find_by_id`, with a missing post reported as `ServiceError::NotFound`.
    async fn get(&self, id: u64) -> Result<Post, ServiceError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("post"))
    }
}
