use std::sync::mpsc::{channel, Receiver, Sender, TryIter};
use std::time::Instant;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, KeyCode, PhysicalKey};

use crate::config::{KEY_LEFT, KEY_RIGHT};
use crate::game::note::Voice;
use crate::game::settings::SettingChange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Midi,
    Gamepad,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEdge {
    pub voice: Voice,
    pub source: InputSource,
    pub timestamp: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Tap(InputEdge),
    Setting(SettingChange),
    Quit,
}

impl InputEvent {
    #[inline(always)]
    pub fn tap(voice: Voice, source: InputSource, timestamp: Instant) -> Self {
        InputEvent::Tap(InputEdge { voice, source, timestamp })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Tap(Voice),
    Setting(SettingChange),
    Quit,
}

impl KeyAction {
    fn into_event(self, timestamp: Instant) -> InputEvent {
        match self {
            KeyAction::Tap(voice) => InputEvent::tap(voice, InputSource::Keyboard, timestamp),
            KeyAction::Setting(change) => InputEvent::Setting(change),
            KeyAction::Quit => InputEvent::Quit,
        }
    }
}

/// Maps a key to a trainer action. `text` is the logical character, so a
/// shifted `=` still reads as `+`.
#[inline(always)]
pub fn action_for_key(code: KeyCode, text: Option<&str>) -> Option<KeyAction> {
    if text == Some("+") {
        return Some(KeyAction::Setting(SettingChange::BpmUp));
    }
    match code {
        c if c == KEY_LEFT => Some(KeyAction::Tap(Voice::Left)),
        c if c == KEY_RIGHT => Some(KeyAction::Tap(Voice::Right)),
        KeyCode::KeyQ | KeyCode::Escape => Some(KeyAction::Quit),
        KeyCode::KeyE => Some(KeyAction::Setting(SettingChange::ToggleMode)),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(KeyAction::Setting(SettingChange::BpmDown)),
        KeyCode::NumpadAdd => Some(KeyAction::Setting(SettingChange::BpmUp)),
        _ => None,
    }
}

/// Converts a winit key press into a queued event. Releases and repeats are ignored.
pub fn event_from_key(event: &KeyEvent, timestamp: Instant) -> Option<InputEvent> {
    if event.state != ElementState::Pressed || event.repeat {
        return None;
    }
    let PhysicalKey::Code(code) = event.physical_key else {
        return None;
    };
    let text = match &event.logical_key {
        Key::Character(c) => Some(c.as_str()),
        _ => None,
    };
    action_for_key(code, text).map(|action| action.into_event(timestamp))
}

/// Single queue shared by every input source. Producers on other threads hold
/// a cloned `Sender`; the trainer drains it in receipt order.
pub struct EventQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    #[inline(always)]
    pub fn push(&self, event: InputEvent) {
        // The receiver lives as long as the queue, so this cannot fail.
        let _ = self.sender.send(event);
    }

    #[inline(always)]
    pub fn drain(&self) -> TryIter<'_, InputEvent> {
        self.receiver.try_iter()
    }
}
