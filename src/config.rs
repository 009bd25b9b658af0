use crate::app_dirs::AppDirs;
use crate::controls::OPTION_LABELS;
use crate::session::QuizSettings;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rounds: usize,
    pub countdown_secs: u32,
    pub options_per_round: usize,
    /// Translation shown under each prompt, if the topic has one in this language.
    pub hint_language: Option<String>,
    /// Topic played when none is named on the command line.
    pub default_topic: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = QuizSettings::default();
        Self {
            rounds: settings.rounds,
            countdown_secs: settings.countdown_secs,
            options_per_round: settings.options_per_round,
            hint_language: Some("ja".to_string()),
            default_topic: None,
        }
    }
}

impl Config {
    /// Settings for a new session. Values the front-end cannot play are clamped:
    /// at least one round and one second, and no more options than there are keys.
    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            rounds: clamped("rounds", self.rounds, 1, usize::MAX),
            countdown_secs: clamped("countdown_secs", self.countdown_secs, 1, u32::MAX),
            options_per_round: clamped("options_per_round", self.options_per_round, 1, OPTION_LABELS.len()),
        }
    }
}

fn clamped<T: Ord + Copy + std::fmt::Display>(name: &str, value: T, min: T, max: T) -> T {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("config {name} = {value} is out of range, using {clamped}");
    }
    clamped
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("kaiwa_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("ignoring unreadable config {}: {err}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
