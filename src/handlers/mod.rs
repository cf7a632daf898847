// HTTP handlers for the video transcriber
//
// This module contains the HTTP handlers for the service.
// It provides the interface between HTTP requests and the two adapters.

pub mod routes;

// Re-export handlers for easier access
pub use self::routes::{index, transcribe};
