use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root application configuration, loaded from `~/.config/hotelbook/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub booking: BookingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub customers_file: String,
    pub hotels_file: String,
    pub reservations_file: String,
    /// Fail on malformed collection files instead of treating them as empty.
    pub strict_load: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Require the customer and hotel to exist before booking.
    pub verify_references: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("hotelbook")
            .join("db");

        Self {
            data_dir: data_dir.to_string_lossy().to_string(),
            customers_file: "customers.json".to_string(),
            hotels_file: "hotels.json".to_string(),
            reservations_file: "reservations.json".to_string(),
            strict_load: false,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            verify_references: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/hotelbook/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("HOTELBOOK_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("hotelbook")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.storage.data_dir = dir.to_string_lossy().to_string();
    }

    // ─── Derived paths ─────────────────────────────────────

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.customers_file)
    }

    pub fn hotels_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.hotels_file)
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.reservations_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.storage.hotels_file, "hotels.json");
        assert!(cfg.booking.verify_references);
        assert!(!cfg.storage.strict_load);
        assert_eq!(cfg.log.filter, "info");
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.storage.strict_load = true;
        cfg.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert!(loaded.storage.strict_load);
        assert_eq!(loaded.storage.data_dir, cfg.storage.data_dir);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nhotels_file = \"h.json\"\n").unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.storage.hotels_file, "h.json");
        assert_eq!(cfg.storage.customers_file, "customers.json");
        assert!(cfg.booking.verify_references);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let path = Path::new("/tmp/nonexistent_hotelbook_config.toml");
        let cfg = AppConfig::load_from(path).unwrap();
        assert_eq!(cfg.storage.reservations_file, "reservations.json");
    }

    #[test]
    fn test_derived_paths() {
        let mut cfg = AppConfig::default();
        cfg.set_data_dir(PathBuf::from("/srv/hotelbook"));
        assert_eq!(cfg.customers_path(), PathBuf::from("/srv/hotelbook/customers.json"));
        assert_eq!(cfg.hotels_path(), PathBuf::from("/srv/hotelbook/hotels.json"));
    }
}
