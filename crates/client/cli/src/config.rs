//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::RuntimeConfig;

/// Everything the terminal client needs besides the game rules.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    /// Directory holding the single save slot.
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    /// How long a damage number stays on screen before health changes.
    pub damage_delay: Duration,
    pub message_capacity: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            save_dir: default_data_dir(),
            log_dir: default_log_dir(),
            damage_delay: Duration::from_millis(250),
            message_capacity: 64,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (on top of the ones [`RuntimeConfig::from_env`] reads):
    /// - `SKIRMISH_SAVE_DIR` - Directory for the save file (default: platform data dir)
    /// - `SKIRMISH_LOG_DIR` - Directory for log files (default: platform cache dir)
    /// - `SKIRMISH_DAMAGE_DELAY_MS` - Damage cue length (default: 250)
    /// - `SKIRMISH_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        if let Some(dir) = env::var_os("SKIRMISH_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os("SKIRMISH_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(millis) = read_env::<u64>("SKIRMISH_DAMAGE_DELAY_MS") {
            config.damage_delay = Duration::from_millis(millis);
        }
        if let Some(capacity) = read_env::<usize>("SKIRMISH_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "skirmish")
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join("skirmish"))
}

fn default_log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| env::temp_dir().join("skirmish").join("logs"))
}
