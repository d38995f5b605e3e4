//! Persisted record types shared by the service and HTTP layers.

pub mod post;

pub use post::{Post, PostFields};
