use crate::config::SettingsStore;
use crate::core::input::{InputEdge, InputEvent};
use crate::game::bar::{self, Bar};
use crate::game::judgment::{self, Verdict, Verdicts};
use crate::game::note::{BAR_SLOTS, NoteValue, Voice};
use crate::game::settings::{SettingChange, Settings};
use crate::game::stats::Stats;
use crate::game::timing::{Phase, SchedulerOptions, SlotClock};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainerAction {
    None,
    Exit,
}

pub struct State {
    pub settings: Settings,
    pub options: SchedulerOptions,
    pub bar: Bar,
    pub verdicts: [Verdicts; 2],
    pub pos: usize,
    pub clock: SlotClock,
    pub phase: Phase,
    pub stats: Stats,
    pub bars_started: u64,
    answered: [bool; 2],
    pending: VecDeque<InputEvent>,
    redraw: bool,
    rng: StdRng,
}

/// Starts a session: composes the first bar and opens its downbeat slot at `now`.
pub fn init(settings: Settings, options: SchedulerOptions, mut rng: StdRng, now: Instant) -> State {
    let bar = bar::compose(&mut rng, settings.mode);
    let mut state = State {
        settings,
        options,
        bar,
        verdicts: [[Verdict::Unset; BAR_SLOTS]; 2],
        pos: 0,
        clock: SlotClock::idle(),
        phase: Phase::SlotOpen,
        stats: Stats::default(),
        bars_started: 0,
        answered: [false; 2],
        pending: VecDeque::new(),
        redraw: true,
        rng,
    };
    reset_for_bar(&mut state, now);
    info!(
        "Session started at {} BPM, {} mode, timer start {:?}.",
        state.settings.bpm(),
        state.settings.mode.label(),
        state.options.timer_start
    );
    state
}

#[inline(always)]
pub fn queue_event(state: &mut State, event: InputEvent) {
    state.pending.push_back(event);
}

#[inline(always)]
pub fn expected(state: &State, voice: Voice) -> NoteValue {
    state.bar.pattern(voice).slot(state.pos)
}

/// Returns and clears the "something visible changed" flag.
#[inline(always)]
pub fn take_redraw(state: &mut State) -> bool {
    std::mem::take(&mut state.redraw)
}

/// The next instant at which the scheduler changes phase on its own, if any.
/// `None` while the downbeat waits for its first tap.
pub fn next_wake(state: &State) -> Option<Instant> {
    match state.phase {
        Phase::SlotOpen => state.clock.deadline(state.settings.beat()),
        Phase::SlotSettle { until } | Phase::BarEnd { until } => Some(until),
    }
}

/* -------------------- bar / slot transitions -------------------- */

fn enter_bar(state: &mut State, at: Instant) {
    state.bar = bar::compose(&mut state.rng, state.settings.mode);
    reset_for_bar(state, at);
}

fn reset_for_bar(state: &mut State, at: Instant) {
    state.verdicts = [[Verdict::Unset; BAR_SLOTS]; 2];
    state.pos = 0;
    state.answered = [false; 2];
    state.clock = if state.options.timer_start.defers(state.bars_started) {
        SlotClock::idle()
    } else {
        SlotClock::started_at(at)
    };
    state.bars_started += 1;
    state.phase = Phase::SlotOpen;
    state.redraw = true;
}

fn open_slot(state: &mut State, at: Instant) {
    state.answered = [false; 2];
    state.clock = SlotClock::started_at(at);
    state.phase = Phase::SlotOpen;
    state.redraw = true;
}

/// Judges whatever is still unset at `pos`, then waits out the rest of the beat.
fn close_slot(state: &mut State, at: Instant) {
    let pos = state.pos;
    for voice in Voice::ALL {
        let expected = state.bar.pattern(voice).slot(pos);
        let slot = &mut state.verdicts[voice.index()][pos];
        *slot = judgment::judge_silence(*slot, expected);
    }
    debug!(
        "Slot {} closed: L {:?} R {:?}",
        pos,
        state.verdicts[Voice::Left.index()][pos],
        state.verdicts[Voice::Right.index()][pos]
    );

    let beat = state.settings.beat();
    let slot_end = state.clock.deadline(beat).map_or(at, |deadline| deadline.max(at));
    state.pos += 1;
    state.redraw = true;

    if state.pos < BAR_SLOTS {
        state.phase = Phase::SlotSettle { until: slot_end };
        return;
    }

    let [left, right] = state.verdicts;
    state.stats.fold(&left, &right);
    match state.stats.accuracy() {
        Some(acc) => info!("Bar {} done: L {:?} R {:?} | {:.0}%", state.bars_started, left, right, acc),
        None => info!("Bar {} done: L {:?} R {:?}", state.bars_started, left, right),
    }
    state.phase = Phase::BarEnd { until: slot_end + beat };
}

/// Runs every transition due at or before `t`.
fn advance_to(state: &mut State, t: Instant) {
    loop {
        match state.phase {
            Phase::SlotOpen => match state.clock.deadline(state.settings.beat()) {
                Some(deadline) if t >= deadline => close_slot(state, deadline),
                _ => return,
            },
            Phase::SlotSettle { until } if t >= until => open_slot(state, until),
            Phase::BarEnd { until } if t >= until => enter_bar(state, until),
            Phase::SlotSettle { .. } | Phase::BarEnd { .. } => return,
        }
    }
}

/* -------------------- input -------------------- */

/// Judges one tap against the open slot. The first tap of the slot also starts
/// its timer if that was deferred.
pub fn on_input(state: &mut State, voice: Voice, timestamp: Instant) {
    if state.phase != Phase::SlotOpen {
        debug!("Dropped stray {:?} tap between slots.", voice);
        return;
    }
    if state.clock.activation().is_some_and(|start| timestamp < start) {
        debug!("Dropped {:?} tap stamped before slot {} opened.", voice, state.pos);
        return;
    }
    if state.clock.start_if_idle(timestamp) {
        debug!("Slot {} timer started by {:?} tap.", state.pos, voice);
    }

    let expected = expected(state, voice);
    let slot = &mut state.verdicts[voice.index()][state.pos];
    *slot = judgment::judge_tap(*slot, expected);
    state.answered[voice.index()] = true;
    state.redraw = true;

    if state.answered.iter().all(|&a| a) {
        close_slot(state, timestamp);
    }
}

fn apply_setting(state: &mut State, change: SettingChange, store: &dyn SettingsStore) {
    if !state.settings.apply(change) {
        debug!("{:?} ignored at {} BPM.", change, state.settings.bpm());
        return;
    }
    info!("Settings: {} BPM, {}.", state.settings.bpm(), state.settings.mode.label());
    state.redraw = true;
    if let Err(e) = store.save(&state.settings) {
        warn!("Failed to save settings: {}", e);
    }
}

/// Applies queued input in receipt order, then runs the clock up to `now`.
/// Each event first lets the clock catch up to its own timestamp, so a tap that
/// landed after a deadline is not credited to the slot that already expired.
pub fn update(state: &mut State, now: Instant, store: &dyn SettingsStore) -> TrainerAction {
    while let Some(event) = state.pending.pop_front() {
        match event {
            InputEvent::Tap(InputEdge { voice, source, timestamp }) => {
                trace!("{:?} tap from {:?}", voice, source);
                advance_to(state, timestamp);
                on_input(state, voice, timestamp);
            }
            InputEvent::Setting(change) => apply_setting(state, change, store),
            InputEvent::Quit => {
                info!("Quit requested after {} bar(s).", state.bars_started.saturating_sub(1));
                state.pending.clear();
                return TrainerAction::Exit;
            }
        }
    }
    advance_to(state, now);
    TrainerAction::None
}

/// How long until the scheduler needs attention again, capped at `poll`.
pub fn wait_budget(state: &State, now: Instant, poll: Duration) -> Duration {
    next_wake(state)
        .map_or(poll, |wake| wake.saturating_duration_since(now))
        .min(poll)
}
