use configparser::ini::Ini;
use log::{info, warn};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use winit::keyboard::KeyCode;

use crate::game::note::Mode;
use crate::game::settings::Settings;
use crate::game::timing::{SchedulerOptions, TimerStart};

// Window
pub const WINDOW_TITLE: &str = "Tap-trainer";
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;
pub const FULLSCREEN: bool = true;

// Tempo
pub const MIN_BPM: u32 = 25;
pub const MAX_BPM: u32 = 240;
pub const DEFAULT_BPM: u32 = 116;

// Input
pub const KEY_LEFT: KeyCode = KeyCode::KeyZ;
pub const KEY_RIGHT: KeyCode = KeyCode::Slash;
pub const MIDI_SPLIT_NOTE: u8 = 64;
pub const MIDI_PERCUSSION_CHANNEL: u8 = 9;
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

// Scheduler policy, overridable from the environment
pub const DEFAULT_SCHEDULER: SchedulerOptions = SchedulerOptions {
    timer_start: TimerStart::FirstInputOfEveryBar,
    highlight_current_slot: true,
};
pub const ENV_TIMER_START: &str = "TAPTRAINER_TIMER_START";
pub const ENV_HIGHLIGHT: &str = "TAPTRAINER_HIGHLIGHT";
pub const ENV_MIDI_PORT: &str = "TAPTRAINER_MIDI_PORT";

// Settings file
pub const SETTINGS_FILE_NAME: &str = ".tap-trainer.cfg";
const SECTION: &str = "main";
const KEY_BPM: &str = "BPM";
const KEY_EXPERT: &str = "expert";

/// Durable home for the two user settings.
pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> Result<(), Box<dyn Error>>;
}

/// INI file store, `[main]` with `BPM` and `expert`.
pub struct IniStore {
    path: PathBuf,
}

impl IniStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.tap-trainer.cfg`, or the working directory when no home is known.
    pub fn in_home_dir() -> Self {
        let path = directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(SETTINGS_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for IniStore {
    fn load(&self) -> Settings {
        let defaults = Settings::default();
        if !self.path.exists() {
            info!("No settings at '{}', using {} BPM / {}.", self.path.display(), defaults.bpm(), defaults.mode.label());
            return defaults;
        }

        let mut conf = Ini::new();
        if let Err(e) = conf.load(&self.path) {
            warn!("Failed to load '{}': {}. Using defaults.", self.path.display(), e);
            return defaults;
        }

        let bpm = match conf.getint(SECTION, KEY_BPM) {
            Ok(Some(v)) if v >= MIN_BPM as i64 && v <= MAX_BPM as i64 => v as u32,
            Ok(Some(v)) => {
                warn!("BPM {} in '{}' is out of range, clamping.", v, self.path.display());
                v.clamp(MIN_BPM as i64, MAX_BPM as i64) as u32
            }
            Ok(None) => defaults.bpm(),
            Err(e) => {
                warn!("Bad BPM in '{}': {}", self.path.display(), e);
                defaults.bpm()
            }
        };
        let mode = match conf.getboolcoerce(SECTION, KEY_EXPERT) {
            Ok(Some(true)) => Mode::Expert,
            Ok(Some(false)) | Ok(None) => defaults.mode,
            Err(e) => {
                warn!("Bad expert flag in '{}': {}", self.path.display(), e);
                defaults.mode
            }
        };

        let settings = Settings::new(bpm, mode);
        info!("Loaded settings: {} BPM, {}.", settings.bpm(), settings.mode.label());
        settings
    }

    fn save(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
        let mut conf = Ini::new_cs();
        conf.set(SECTION, KEY_BPM, Some(settings.bpm().to_string()));
        let expert = if settings.mode.is_expert() { "True" } else { "False" };
        conf.set(SECTION, KEY_EXPERT, Some(expert.to_string()));
        conf.write(&self.path)?;
        Ok(())
    }
}

/// Scheduler policy from the environment, falling back to `DEFAULT_SCHEDULER`.
pub fn scheduler_options() -> SchedulerOptions {
    scheduler_options_from(
        std::env::var(ENV_TIMER_START).ok().as_deref(),
        std::env::var(ENV_HIGHLIGHT).ok().as_deref(),
    )
}

fn scheduler_options_from(timer_start: Option<&str>, highlight: Option<&str>) -> SchedulerOptions {
    let mut options = DEFAULT_SCHEDULER;
    if let Some(raw) = timer_start {
        match TimerStart::parse(raw) {
            Some(policy) => options.timer_start = policy,
            None => warn!("Ignoring unknown {}='{}'.", ENV_TIMER_START, raw),
        }
    }
    if let Some(raw) = highlight {
        match raw.trim() {
            "1" | "true" | "on" => options.highlight_current_slot = true,
            "0" | "false" | "off" => options.highlight_current_slot = false,
            other => warn!("Ignoring unknown {}='{}'.", ENV_HIGHLIGHT, other),
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = IniStore::new(dir.path().join("nope.cfg"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = IniStore::new(dir.path().join("tt.cfg"));
        store.save(&Settings::new(133, Mode::Expert)).unwrap();
        assert_eq!(store.load(), Settings::new(133, Mode::Expert));

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("[main]"));
        assert!(text.contains("BPM"));
    }

    #[test]
    fn reads_the_python_style_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tt.cfg");
        fs::write(&path, "[main]\nbpm = 90\nexpert = True\n").unwrap();
        assert_eq!(IniStore::new(&path).load(), Settings::new(90, Mode::Expert));
    }

    #[test]
    fn corrupt_values_fall_back_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tt.cfg");
        fs::write(&path, "[main]\nBPM = fast\nexpert = 1\n").unwrap();
        assert_eq!(IniStore::new(&path).load(), Settings::new(DEFAULT_BPM, Mode::Expert));

        fs::write(&path, "[main]\nBPM = 500\nexpert = maybe\n").unwrap();
        assert_eq!(IniStore::new(&path).load(), Settings::new(MAX_BPM, Mode::Simple));
    }

    #[test]
    fn missing_section_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tt.cfg");
        fs::write(&path, "[other]\nBPM = 90\n").unwrap();
        assert_eq!(IniStore::new(&path).load(), Settings::default());
    }

    #[test]
    fn save_into_missing_directory_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let store = IniStore::new(dir.path().join("no/such/dir/tt.cfg"));
        assert!(store.save(&Settings::default()).is_err());
    }

    #[test]
    fn scheduler_options_from_env_values() {
        assert_eq!(scheduler_options_from(None, None), DEFAULT_SCHEDULER);
        let opts = scheduler_options_from(Some("bar"), Some("0"));
        assert_eq!(opts.timer_start, TimerStart::AtBarEntry);
        assert!(!opts.highlight_current_slot);
        let opts = scheduler_options_from(Some("bogus"), Some("maybe"));
        assert_eq!(opts, DEFAULT_SCHEDULER);
    }
}
