//! Venue ingestion for The Scene.
//!
//! Sweeps neighborhood × search-term queries against a places text search
//! API, keeps candidates that have a phone, a website and a photo, tags
//! them, and writes the deduplicated list as a generated TypeScript module.

pub mod config;
pub mod ingest;
pub mod places;
pub mod storage;
