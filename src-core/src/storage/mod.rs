//! Storage module
//!
//! Provides key-value persistence for preferences and the quote ledger.

pub mod kv_store;

pub use kv_store::{load_json, save_json, FileStore, KeyValueStore, MemoryStore, StoreFuture};
