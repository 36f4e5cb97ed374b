use gilrs::{Button, Event, EventType, GamepadId, Gilrs};
use log::{info, warn};
use std::time::Instant;

use crate::core::input::{InputEvent, InputSource};
use crate::game::note::Voice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadAction {
    Tap(Voice),
    Quit,
}

/// Button layout: anything on the left side of the pad is the left hand.
#[inline(always)]
pub fn action_for_button(btn: Button) -> Option<PadAction> {
    match btn {
        Button::LeftTrigger | Button::LeftTrigger2 | Button::DPadLeft | Button::West => {
            Some(PadAction::Tap(Voice::Left))
        }
        Button::RightTrigger | Button::RightTrigger2 | Button::DPadRight | Button::East => {
            Some(PadAction::Tap(Voice::Right))
        }
        Button::Select => Some(PadAction::Quit),
        _ => None,
    }
}

/// Polls gilrs, keeps a single active pad, and pushes button presses as events.
pub fn poll_and_collect(gilrs: &mut Gilrs, active_id: &mut Option<GamepadId>, out: &mut Vec<InputEvent>) {
    while let Some(Event { id, event, .. }) = gilrs.next_event() {
        if active_id.is_none() {
            *active_id = Some(id);
        }
        if Some(id) != *active_id {
            continue;
        }

        match event {
            EventType::Connected => {
                *active_id = Some(id);
                info!("Gamepad connected: {}", gilrs.gamepad(id).name());
            }
            EventType::Disconnected => {
                *active_id = None;
                warn!("Gamepad disconnected.");
            }
            EventType::ButtonPressed(btn, _) => match action_for_button(btn) {
                Some(PadAction::Tap(voice)) => {
                    out.push(InputEvent::tap(voice, InputSource::Gamepad, Instant::now()));
                }
                Some(PadAction::Quit) => out.push(InputEvent::Quit),
                None => {}
            },
            _ => {}
        }
    }
}

#[inline(always)]
pub fn try_init() -> Option<Gilrs> {
    match Gilrs::new() {
        Ok(gilrs) => Some(gilrs),
        Err(e) => {
            warn!("Gamepad support unavailable: {}", e);
            None
        }
    }
}
