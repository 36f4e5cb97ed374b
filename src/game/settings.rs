use crate::config::{DEFAULT_BPM, MAX_BPM, MIN_BPM};
use crate::game::note::Mode;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettingChange {
    BpmUp,
    BpmDown,
    ToggleMode,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    bpm: u32,
    pub mode: Mode,
}

impl Default for Settings {
    fn default() -> Self {
        Self { bpm: DEFAULT_BPM, mode: Mode::Simple }
    }
}

impl Settings {
    pub fn new(bpm: u32, mode: Mode) -> Self {
        Self { bpm: bpm.clamp(MIN_BPM, MAX_BPM), mode }
    }

    #[inline(always)]
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Length of one slot at the current tempo.
    #[inline(always)]
    pub fn beat(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.bpm as f64)
    }

    pub fn increment_bpm(&mut self) -> bool {
        if self.bpm >= MAX_BPM {
            return false;
        }
        self.bpm += 1;
        true
    }

    pub fn decrement_bpm(&mut self) -> bool {
        if self.bpm <= MIN_BPM {
            return false;
        }
        self.bpm -= 1;
        true
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Applies `change`, returning whether anything actually moved.
    pub fn apply(&mut self, change: SettingChange) -> bool {
        match change {
            SettingChange::BpmUp => self.increment_bpm(),
            SettingChange::BpmDown => self.decrement_bpm(),
            SettingChange::ToggleMode => {
                self.toggle_mode();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.bpm(), 116);
        assert_eq!(s.mode, Mode::Simple);
    }

    #[test]
    fn bpm_is_clamped_at_both_ends() {
        let mut low = Settings::new(25, Mode::Simple);
        assert!(!low.decrement_bpm());
        assert_eq!(low.bpm(), 25);

        let mut high = Settings::new(240, Mode::Simple);
        assert!(!high.increment_bpm());
        assert_eq!(high.bpm(), 240);

        assert_eq!(Settings::new(10, Mode::Simple).bpm(), 25);
        assert_eq!(Settings::new(999, Mode::Expert).bpm(), 240);
    }

    #[test]
    fn apply_moves_tempo_and_mode() {
        let mut s = Settings::default();
        assert!(s.apply(SettingChange::BpmUp));
        assert_eq!(s.bpm(), 117);
        assert!(s.apply(SettingChange::BpmDown));
        assert!(s.apply(SettingChange::BpmDown));
        assert_eq!(s.bpm(), 115);
        assert!(s.apply(SettingChange::ToggleMode));
        assert_eq!(s.mode, Mode::Expert);
        s.apply(SettingChange::ToggleMode);
        assert_eq!(s.mode, Mode::Simple);
    }

    #[test]
    fn beat_length_follows_tempo() {
        assert_eq!(Settings::new(120, Mode::Simple).beat(), Duration::from_millis(500));
        assert_eq!(Settings::new(60, Mode::Simple).beat(), Duration::from_secs(1));
    }
}
