//! Storage abstractions for service layer
//!
//! Whole-file JSON persistence: every load reads the full file, every save
//! replaces it.

pub mod json_list_store;
