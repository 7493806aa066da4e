use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Zeno metadata subscription URL for the station mount.
    #[serde(default = "default_stream_url")]
    pub url: String,
    /// Timeout for establishing the subscription connection, in seconds.
    /// Once connected, the stream is read without a per-event timeout.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Delay before reconnecting after the stream ends, in seconds.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Where the rendered HTML page is written (overwritten on every change).
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// IANA zone name for the "Updated:" timestamp (the station's local zone).
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: default_stream_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            timezone: default_timezone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stream: StreamConfig::default(),
            page: PageConfig::default(),
        }
    }
}

fn default_stream_url() -> String {
    "https://api.zeno.fm/mounts/metadata/subscribe/gvefnvis2mzvv".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    60
}

fn default_reconnect_delay_secs() -> u64 {
    1
}

fn default_output_path() -> PathBuf {
    data_dir().join("026.html")
}

fn default_timezone() -> String {
    "US/Eastern".to_string()
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wpn")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wpn")
            .join("config.toml")
    }
}

impl PageConfig {
    /// Parse the configured zone name into a real timezone.
    pub fn tz(&self) -> anyhow::Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {}", self.timezone, e))
    }
}
