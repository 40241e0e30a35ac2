use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// Default configuration
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PHONE: &str = "919328552413";
pub const DEFAULT_LATITUDE: f64 = 23.0225;
pub const DEFAULT_LONGITUDE: f64 = 72.5714;

/// Persisted client settings.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    /// Base URL of the simulator backend.
    pub endpoint: String,
    /// Simulated user number; sender id on outbound payloads and identity
    /// on the reply poll.
    pub phone: String,
    /// Sidebar collapse flag. Persisted under a versioned key so stale
    /// values from older layouts are ignored.
    #[serde(rename = "sidebar_collapsed_v2", default = "default_collapsed")]
    pub sidebar_collapsed: bool,
    pub theme: String,
    #[serde(default)]
    pub history: Vec<String>,
    /// Simulated device position used for location shares.
    #[serde(default = "default_latitude")]
    pub sim_latitude: f64,
    #[serde(default = "default_longitude")]
    pub sim_longitude: f64,
}

fn default_collapsed() -> bool {
    true
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            sidebar_collapsed: true,
            theme: "dark".to_string(),
            history: Vec::new(),
            sim_latitude: DEFAULT_LATITUDE,
            sim_longitude: DEFAULT_LONGITUDE,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "simchat", "simchat-client") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            log::error!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
