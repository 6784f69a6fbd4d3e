pub mod app;
pub mod config;
pub mod errors;
pub mod http;
pub mod store;
mod utils;

pub use errors::SyncError;

/// Heart rate in beats per minute
pub type Bpm = u32;

pub type Result<T> = std::result::Result<T, SyncError>;
