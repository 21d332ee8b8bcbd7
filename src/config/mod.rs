use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

pub const DEFAULT_COUNTERS: [&str; 13] = [
    "Roti, Dal / Subzi",
    "Special Counter",
    "Dessert",
    "Chole Bhature",
    "Kadi / Rajma Chawal",
    "Bread Pakoda",
    "Tea",
    "Coffee / Cold Drink",
    "Chips Counter",
    "Sweets Counter",
    "Main office - Coupon Counters",
    "Main Office - Card Counter",
    "Main Office - Admin",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    #[serde(default = "default_counter")]
    pub default_counter: String,
    #[serde(default = "default_team_name")]
    pub team_name: String,
    #[serde(default = "default_counters")]
    pub counters: Vec<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_transcript_chars")]
    pub max_transcript_chars: usize,
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_day_start_hour() -> u32 {
    4
}
fn default_counter() -> String {
    "General".to_string()
}
fn default_team_name() -> String {
    "Jalpan Sewa".to_string()
}
fn default_counters() -> Vec<String> {
    DEFAULT_COUNTERS.iter().map(|c| c.to_string()).collect()
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_max_transcript_chars() -> usize {
    150_000
}
fn default_extraction_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            day_start_hour: default_day_start_hour(),
            default_counter: default_counter(),
            team_name: default_team_name(),
            counters: default_counters(),
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            max_transcript_chars: default_max_transcript_chars(),
            extraction_timeout_secs: default_extraction_timeout_secs(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("sewalogger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".sewalogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sewalogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sewalogger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.day_start_hour > 23 {
            return Err(AppError::InvalidHour(self.day_start_hour));
        }
        if self.max_transcript_chars == 0 {
            return Err(AppError::Config(
                "max_transcript_chars must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Database path with `~/` expanded.
    pub fn database_path(&self) -> String {
        expand_tilde(&self.database).to_string_lossy().to_string()
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("sewalogger.sqlite"),
        };

        let config = Self::with_database(db_path.clone());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
