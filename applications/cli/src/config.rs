/// CLI configuration
use crate::error::{CliError, Result};
use pokoro_playback::{PlaybackConfig, RepeatMode};
use pokoro_supabase::SupabaseConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pokoro.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub supabase: SupabaseSettings,

    #[serde(default)]
    pub identity: IdentitySettings,

    #[serde(default)]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SupabaseSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentitySettings {
    /// Where the generated guest id is kept
    #[serde(default = "default_guest_id_path")]
    pub guest_id_path: PathBuf,

    /// Host platform user id, when launched from the host
    #[serde(default)]
    pub host_user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub repeat: RepeatMode,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist; otherwise `pokoro.toml` is read when
    /// present. `POKORO_*` variables override both, with `__` between
    /// nesting levels (`POKORO_SUPABASE__ANON_KEY`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings.add_source(
                config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
            ),
        };

        settings = settings.add_source(
            config::Environment::with_prefix("POKORO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.supabase.url.trim();
        if url.is_empty() {
            return Err(CliError::Config(
                "Supabase URL is required (set POKORO_SUPABASE__URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "Supabase URL must start with http:// or https://, got {:?}",
                url
            )));
        }
        if self.supabase.anon_key.trim().is_empty() {
            return Err(CliError::Config(
                "Supabase anon key is required (set POKORO_SUPABASE__ANON_KEY)".to_string(),
            ));
        }
        if self.identity.guest_id_path.as_os_str().is_empty() {
            return Err(CliError::Config("Guest id path cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn supabase(&self) -> SupabaseConfig {
        SupabaseConfig::new(self.supabase.url.trim(), self.supabase.anon_key.trim())
    }

    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            shuffle: self.playback.shuffle,
            repeat: self.playback.repeat,
        }
    }
}

// Default values
fn default_guest_id_path() -> PathBuf {
    PathBuf::from(".pokoro/guest.json")
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            guest_id_path: default_guest_id_path(),
            host_user_id: None,
        }
    }
}
