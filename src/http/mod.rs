pub mod models;
pub mod cache;
mod handlers;
pub mod server;

// Re-export commonly used types
pub use cache::BpmCache;
pub use models::*;
pub use server::SyncServer;
