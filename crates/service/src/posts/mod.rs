//! Blog posts persisted as one JSON array.

pub mod repository;
pub mod store;
