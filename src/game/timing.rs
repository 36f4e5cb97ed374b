use std::time::{Duration, Instant};

/// When the downbeat slot of a bar starts counting down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimerStart {
    /// The timer starts the moment the bar is entered.
    AtBarEntry,
    /// Only the first bar of the session waits for a tap; later bars start on entry.
    FirstInputOfSession,
    /// Every bar waits for its first tap before the downbeat timer runs.
    #[default]
    FirstInputOfEveryBar,
}

impl TimerStart {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "entry" | "immediate" => Some(TimerStart::AtBarEntry),
            "session" => Some(TimerStart::FirstInputOfSession),
            "every-bar" | "every_bar" | "input" => Some(TimerStart::FirstInputOfEveryBar),
            _ => None,
        }
    }

    /// Whether the bar about to start (`bars_started` bars came before it) waits for input.
    #[inline(always)]
    pub fn defers(self, bars_started: u64) -> bool {
        match self {
            TimerStart::AtBarEntry => false,
            TimerStart::FirstInputOfSession => bars_started == 0,
            TimerStart::FirstInputOfEveryBar => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SchedulerOptions {
    pub timer_start: TimerStart,
    /// Highlight the active slot. Only ever applied in simple mode.
    pub highlight_current_slot: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self { timer_start: TimerStart::default(), highlight_current_slot: true }
    }
}

/* -------------------- scheduler phases -------------------- */
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The slot at `pos` is accepting taps.
    SlotOpen,
    /// The slot was judged; waiting out the rest of its beat. Taps are dropped.
    SlotSettle { until: Instant },
    /// All four slots were judged; dead time before the next bar. Taps are dropped.
    BarEnd { until: Instant },
}

/// Tracks when the active slot's window started.
///
/// `activation` stays `None` until the first tap when the timer start is
/// deferred, so reaction lag on the first tap is not held against the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotClock {
    activation: Option<Instant>,
}

impl SlotClock {
    pub fn started_at(at: Instant) -> Self {
        Self { activation: Some(at) }
    }

    pub fn idle() -> Self {
        Self { activation: None }
    }

    #[inline(always)]
    pub fn activation(&self) -> Option<Instant> {
        self.activation
    }

    /// Starts the clock at `at` unless it is already running.
    pub fn start_if_idle(&mut self, at: Instant) -> bool {
        if self.activation.is_some() {
            return false;
        }
        self.activation = Some(at);
        true
    }

    #[inline(always)]
    pub fn deadline(&self, beat: Duration) -> Option<Instant> {
        self.activation.map(|start| start + beat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEAT: Duration = Duration::from_millis(500);

    #[test]
    fn idle_clock_has_no_deadline() {
        let clock = SlotClock::idle();
        assert_eq!(clock.deadline(BEAT), None);
        assert_eq!(clock.activation(), None);
    }

    #[test]
    fn deadline_is_measured_from_activation() {
        let t0 = Instant::now();
        let mut clock = SlotClock::idle();
        assert!(clock.start_if_idle(t0 + Duration::from_millis(50)));
        assert!(!clock.start_if_idle(t0 + Duration::from_millis(90)));
        assert_eq!(clock.deadline(BEAT), Some(t0 + Duration::from_millis(550)));
        assert_eq!(clock.activation(), Some(t0 + Duration::from_millis(50)));
    }

    #[test]
    fn timer_start_policies() {
        assert!(!TimerStart::AtBarEntry.defers(0));
        assert!(TimerStart::FirstInputOfSession.defers(0));
        assert!(!TimerStart::FirstInputOfSession.defers(1));
        assert!(TimerStart::FirstInputOfEveryBar.defers(0));
        assert!(TimerStart::FirstInputOfEveryBar.defers(7));
    }

    #[test]
    fn timer_start_parses_env_spellings() {
        assert_eq!(TimerStart::parse("bar"), Some(TimerStart::AtBarEntry));
        assert_eq!(TimerStart::parse(" Session "), Some(TimerStart::FirstInputOfSession));
        assert_eq!(TimerStart::parse("every-bar"), Some(TimerStart::FirstInputOfEveryBar));
        assert_eq!(TimerStart::parse("sometimes"), None);
    }
}
