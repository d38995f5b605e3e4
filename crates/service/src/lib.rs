//! Service layer: the flat-file post store and the pieces around it.
//! - `storage` persists a whole `Vec<T>` as one JSON file.
//! - `posts` assigns ids and implements create/find/update/delete on top of it.
//! - `metrics` counts store activity for the `/metrics` endpoint.

pub mod errors;
pub mod metrics;
pub mod posts;
pub mod runtime;
pub mod storage;

pub use posts::{repository::PostRepository, store::PostStore};
pub use storage::json_list_store::LoadPolicy;
