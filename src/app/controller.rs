use std::path::{Path, PathBuf};
use crate::config::Config;
use crate::http::SyncServer;
use crate::Bpm;

/// Owns the persisted configuration and the server.
///
/// Every setting change goes through an explicit method here so the config
/// and the server never disagree; changes are saved immediately and the
/// server picks them up on its next start.
pub struct AppController {
    config: Config,
    config_path: PathBuf,
    server: SyncServer,
}

impl AppController {
    pub fn new(config: Config, config_path: impl Into<PathBuf>) -> Self {
        let server = SyncServer::new(&config.file_path, config.full_listen_addr());
        Self {
            config,
            config_path: config_path.into(),
            server,
        }
    }

    /// Load settings from `config_path`, or use defaults.
    pub fn load(config_path: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let config = Config::load_or_default(&config_path);
        Self::new(config, config_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn server(&self) -> &SyncServer {
        &self.server
    }

    pub fn set_file_path(&mut self, path: &str) {
        self.config.file_path = path.to_string();
        self.server.file_path = PathBuf::from(path);
        self.save_config();
    }

    /// Use a picked file and remember its directory for the next pick.
    pub fn select_file(&mut self, path: &Path) {
        if let Some(dir) = path.parent() {
            self.config.last_save_dir = dir.to_string_lossy().into_owned();
        }
        self.set_file_path(&path.to_string_lossy());
    }

    pub fn set_listen_addr(&mut self, host: &str, port: u16) {
        self.config.listen_addr = host.to_string();
        self.config.listen_port = port;
        self.server.listen_addr = self.config.full_listen_addr();
        self.save_config();
    }

    /// Start the server if stopped, stop it if running.
    ///
    /// Returns whether the server is running afterwards.
    pub async fn toggle(&mut self) -> crate::Result<bool> {
        if self.server.is_running() {
            self.server.stop().await?;
            tracing::info!("{}", self.status_line());
        } else {
            self.server.start().await?;
            tracing::info!("{}", self.status_line());
        }
        Ok(self.server.is_running())
    }

    /// Current file value for display, `None` if it cannot be read.
    pub async fn refresh_current(&self) -> Option<Bpm> {
        match self.server.read_current_value().await {
            Ok(bpm) => Some(bpm),
            Err(e) => {
                tracing::debug!("refresh failed: {}", e);
                None
            }
        }
    }

    pub fn status_line(&self) -> String {
        match self.server.local_addr() {
            Some(addr) => format!("Server running - {}", addr),
            None => "Server stopped".to_string(),
        }
    }

    /// Snippet for the overlay's `UserData/HRCounter.json`
    pub fn feed_config(&self) -> String {
        format!(
            "\"DataSource\": \"WebRequest\",\n\"FeedLink\": \"http://{}/\"",
            self.server.listen_addr
        )
    }

    pub fn save_config(&self) {
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::warn!("failed to save configuration: {}", e);
        }
    }

    /// Stop the server and persist the configuration.
    pub async fn shutdown(&mut self) -> crate::Result<()> {
        let result = self.server.stop().await;
        self.save_config();
        result
    }
}
