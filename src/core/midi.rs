use std::error::Error;
use std::sync::mpsc::Sender;
use std::time::Instant;

use log::{info, warn};
use midir::{Ignore, MidiInput, MidiInputConnection};

use crate::config::{MIDI_PERCUSSION_CHANNEL, MIDI_SPLIT_NOTE};
use crate::core::input::{InputEvent, InputSource};
use crate::game::note::Voice;

const NOTE_ON: u8 = 0x90;

/// Which hand a raw MIDI message plays, if it is a tap at all.
///
/// Only note-on with a non-zero velocity counts, and the percussion channel is
/// skipped. Notes up to the split point are the left hand.
#[inline(always)]
pub fn voice_for_message(bytes: &[u8]) -> Option<Voice> {
    let [status, note, velocity, ..] = *bytes else {
        return None;
    };
    let command = status & 0xF0;
    let channel = status & 0x0F;
    if command != NOTE_ON || channel == MIDI_PERCUSSION_CHANNEL || velocity == 0 {
        return None;
    }
    if note > MIDI_SPLIT_NOTE { Some(Voice::Right) } else { Some(Voice::Left) }
}

/// Keeps a MIDI input port open. midir delivers messages on its own thread,
/// which forwards taps into the shared event queue.
pub struct MidiTaps {
    _connection: MidiInputConnection<()>,
}

impl MidiTaps {
    /// Connects to the first port whose name contains `hint`, or the first port at all.
    /// `Ok(None)` means no MIDI device is present.
    pub fn connect(sender: Sender<InputEvent>, hint: Option<&str>) -> Result<Option<Self>, Box<dyn Error>> {
        let mut midi_in = MidiInput::new("taptrainer").map_err(|e| format!("MIDI init error: {}", e))?;
        midi_in.ignore(Ignore::Sysex | Ignore::Time | Ignore::ActiveSense);

        let ports = midi_in.ports();
        let port = match hint {
            Some(hint) => ports
                .iter()
                .find(|p| midi_in.port_name(p).is_ok_and(|name| name.contains(hint)))
                .or_else(|| {
                    warn!("No MIDI port matching '{}', falling back to the first one.", hint);
                    ports.first()
                }),
            None => ports.first(),
        };
        let Some(port) = port.cloned() else {
            info!("No MIDI input ports found; keyboard and gamepad only.");
            return Ok(None);
        };

        let port_name = midi_in.port_name(&port).unwrap_or_else(|_| "unknown".to_string());
        let connection = midi_in
            .connect(
                &port,
                "taptrainer-input",
                move |_stamp_us, message, _| {
                    let Some(voice) = voice_for_message(message) else { return };
                    // A closed queue only means the trainer is shutting down.
                    let _ = sender.send(InputEvent::tap(voice, InputSource::Midi, Instant::now()));
                },
                (),
            )
            .map_err(|e| format!("MIDI connect error: {}", e))?;

        info!("Listening for MIDI taps on '{}'.", port_name);
        Ok(Some(Self { _connection: connection }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_point_divides_the_hands() {
        assert_eq!(voice_for_message(&[0x90, 64, 100]), Some(Voice::Left));
        assert_eq!(voice_for_message(&[0x90, 0, 1]), Some(Voice::Left));
        assert_eq!(voice_for_message(&[0x90, 65, 100]), Some(Voice::Right));
        assert_eq!(voice_for_message(&[0x93, 127, 20]), Some(Voice::Right));
    }

    #[test]
    fn percussion_channel_is_ignored() {
        assert_eq!(voice_for_message(&[0x99, 36, 100]), None);
        assert_eq!(voice_for_message(&[0x98, 36, 100]), Some(Voice::Left));
    }

    #[test]
    fn zero_velocity_note_on_is_a_release() {
        assert_eq!(voice_for_message(&[0x90, 60, 0]), None);
    }

    #[test]
    fn other_messages_are_ignored() {
        assert_eq!(voice_for_message(&[0x80, 60, 64]), None); // note off
        assert_eq!(voice_for_message(&[0xB0, 7, 127]), None); // control change
        assert_eq!(voice_for_message(&[0x90, 60]), None); // truncated
        assert_eq!(voice_for_message(&[]), None);
    }
}
