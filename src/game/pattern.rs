use crate::game::note::{Mode, NoteValue, Pattern, BAR_SLOTS};
use rand::Rng;

const SIMPLE_ALPHABET: [NoteValue; 3] = [NoteValue::Quarter, NoteValue::EighthPair, NoteValue::Whole];
const EXPERT_ALPHABET: [NoteValue; 4] = [
    NoteValue::Quarter,
    NoteValue::EighthPair,
    NoteValue::Whole,
    NoteValue::Rest,
];

#[inline(always)]
fn alphabet(mode: Mode) -> &'static [NoteValue] {
    match mode {
        Mode::Simple => &SIMPLE_ALPHABET,
        Mode::Expert => &EXPERT_ALPHABET,
    }
}

/// Whether `value` may be appended to a partial bar of `len` slots.
#[inline(always)]
fn is_legal(value: NoteValue, len: usize, allow_leading_rest: bool) -> bool {
    match value {
        NoteValue::Quarter => true,
        NoteValue::EighthPair => len + 2 <= BAR_SLOTS,
        NoteValue::Whole => len == 0,
        NoteValue::Rest => allow_leading_rest || len > 0,
    }
}

/// Draws a random 4-slot rhythm for one voice.
///
/// Every draw is uniform over the whole alphabet; a draw that does not fit the
/// partial bar is thrown away and redrawn, so values that are legal more often
/// (quarters) come out more often than a renormalised draw would give.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, allow_leading_rest: bool, mode: Mode) -> Pattern {
    let alphabet = alphabet(mode);
    let mut slots = [NoteValue::Rest; BAR_SLOTS];
    let mut len = 0;

    while len < BAR_SLOTS {
        let value = alphabet[rng.random_range(0..alphabet.len())];
        if !is_legal(value, len, allow_leading_rest) {
            continue;
        }
        slots[len] = value;
        len += value.span();
    }

    Pattern::from_slots(slots)
}
