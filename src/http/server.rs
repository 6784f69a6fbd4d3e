//! HTTP server setup and management

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use super::cache::BpmCache;
use super::handlers::{router, AppState};
use crate::errors::SyncError;
use crate::store::BpmFile;
use crate::Bpm;

struct ServerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
    local_addr: SocketAddr,
}

/// File-backed heart rate server.
///
/// `file_path` and `listen_addr` may be changed at any time but only take
/// effect on the next [`SyncServer::start`].
pub struct SyncServer {
    pub file_path: PathBuf,
    pub listen_addr: String,
    cache: BpmCache,
    handle: Option<ServerHandle>,
}

impl SyncServer {
    pub fn new(file_path: impl Into<PathBuf>, listen_addr: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            listen_addr: listen_addr.into(),
            cache: BpmCache::default(),
            handle: None,
        }
    }

    /// Bind the listener and serve in the background.
    ///
    /// Returns the bound address, which differs from `listen_addr` when port 0
    /// was requested.
    pub async fn start(&mut self) -> crate::Result<SocketAddr> {
        if self.handle.is_some() {
            return Err(SyncError::AlreadyRunning);
        }

        let store = BpmFile::new(&self.file_path);
        match store.read().await {
            Ok(bpm) => self.cache.set(bpm).await,
            Err(e) => {
                tracing::warn!("{}, keeping cached value {}", e, self.cache.get().await);
            }
        }

        let listener = TcpListener::bind(self.listen_addr.as_str())
            .await
            .map_err(|source| SyncError::Bind {
                addr: self.listen_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| SyncError::Bind {
            addr: self.listen_addr.clone(),
            source,
        })?;

        let app = router(AppState::new(self.cache.clone(), store));
        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();

        let task = tokio::spawn(async move {
            tracing::info!("Heart rate server listening on http://{}/", local_addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await
        });

        self.handle = Some(ServerHandle {
            shutdown,
            task,
            local_addr,
        });
        Ok(local_addr)
    }

    /// Close the listener without waiting for in-flight requests.
    pub async fn stop(&mut self) -> crate::Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        // idle keep-alive connections close on the signal, the abort drops
        // the listener right away
        handle.shutdown.cancel();
        handle.task.abort();

        let result = match handle.task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(SyncError::Shutdown(e.to_string())),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(SyncError::Shutdown(e.to_string())),
        };

        match &result {
            Ok(()) => tracing::info!("Heart rate server on {} stopped", handle.local_addr),
            Err(e) => tracing::error!("{}", e),
        }
        result
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Address actually bound while running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.handle.as_ref().map(|h| h.local_addr)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Last value served or received
    pub async fn cached_value(&self) -> Bpm {
        self.cache.get().await
    }

    /// Read the file directly, without touching the cache.
    pub async fn read_current_value(&self) -> crate::Result<Bpm> {
        BpmFile::new(&self.file_path).read().await
    }
}
