use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::errors::SyncError;

pub const DEFAULT_LISTEN_HOST: &str = "localhost";
pub const DEFAULT_LISTEN_PORT: u16 = 2548;

const CONFIG_FILE_NAME: &str = "hrbridge.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // heart rate text file, eg: D:\heartrate\heartrate.txt
    #[serde(default = "default_file_path")]
    pub file_path: String,

    // host part of the listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    // directory the bpm file was last picked from
    #[serde(default)]
    pub last_save_dir: String,
}

fn default_file_path() -> String {
    #[cfg(target_os = "windows")]
    return "D:\\heartrate\\heartrate.txt".to_string();
    #[cfg(not(target_os = "windows"))]
    return "heartrate.txt".to_string();
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_HOST.to_string()
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
            last_save_dir: String::new(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Config> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SyncError::Configuration(format!("read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| SyncError::Configuration(format!("parse {}: {}", path.display(), e)))
    }

    /// Load the settings file, falling back to defaults.
    ///
    /// A missing file is created with the defaults; an unreadable or broken
    /// one is left alone and logged.
    pub fn load_or_default(path: impl AsRef<Path>) -> Config {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("{}", e);
            }
            return config;
        }

        match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using default configuration", e);
                Config::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| SyncError::Configuration(format!("serialize: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| SyncError::Configuration(format!("write {}: {}", path.display(), e)))
    }

    /// `hrbridge.toml` next to the executable
    pub fn default_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }

    /// eg: localhost:2548
    pub fn full_listen_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.listen_port)
    }

    /// Split `host:port`; anything else resets both to the defaults.
    pub fn set_full_listen_addr(&mut self, addr: &str) {
        let parsed = match addr.split(':').collect::<Vec<_>>().as_slice() {
            [host, port] => port.parse::<u16>().ok().map(|port| (host.to_string(), port)),
            _ => None,
        };

        (self.listen_addr, self.listen_port) = parsed
            .unwrap_or_else(|| (default_listen_addr(), default_listen_port()));
    }
}
