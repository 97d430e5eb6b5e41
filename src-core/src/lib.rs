//! WhisperZen library
//!
//! Quote catalog, preference-filtered selection, history and favorites,
//! and the timers that rotate quotes and send notifications.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
