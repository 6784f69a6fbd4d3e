//! Last known bpm value

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use crate::Bpm;

/// Shared between the server handle and every request handler.
///
/// A request holds the guard from [`BpmCache::lock`] for its whole
/// read-file-then-respond or write-file-then-respond sequence, so GET and POST
/// never interleave.
#[derive(Debug, Clone, Default)]
pub struct BpmCache {
    last_known: Arc<Mutex<Bpm>>,
}

impl BpmCache {
    pub fn new(initial: Bpm) -> Self {
        Self {
            last_known: Arc::new(Mutex::new(initial)),
        }
    }

    /// Get the cached value
    pub async fn get(&self) -> Bpm {
        *self.last_known.lock().await
    }

    /// Replace the cached value
    pub async fn set(&self, bpm: Bpm) {
        *self.last_known.lock().await = bpm;
    }

    /// Take exclusive access for a whole request.
    pub async fn lock(&self) -> MutexGuard<'_, Bpm> {
        self.last_known.lock().await
    }
}
