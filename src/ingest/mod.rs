pub mod service;

pub use service::{IngestionService, Offer, RunContext, RunReport, RunSettings, RunStats};
