//! Photomark core library
//!
//! Configuration, the pipeline error taxonomy, and the storage-event
//! model shared by the storage, processing, and worker crates.

pub mod config;
pub mod error;
pub mod event;

pub use config::{AppConfig, StorageBackend};
pub use error::{PipelineError, Stage};
pub use event::{EventRecord, StorageEvent};
