use crate::game::note::{NoteValue, BAR_SLOTS};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Verdict {
    #[default]
    Unset,
    Correct,
    Incorrect,
}

impl Verdict {
    #[inline(always)]
    pub const fn is_set(self) -> bool {
        !matches!(self, Verdict::Unset)
    }
}

pub type Verdicts = [Verdict; BAR_SLOTS];

/// Verdict for a tap on a slot expecting `expected`, given what the slot already holds.
///
/// The first tap wins or loses on the pattern; any further tap in the same slot
/// is a double tap and always fails.
#[inline(always)]
pub fn judge_tap(current: Verdict, expected: NoteValue) -> Verdict {
    if current.is_set() {
        return Verdict::Incorrect;
    }
    if expected.expects_input() { Verdict::Correct } else { Verdict::Incorrect }
}

/// Verdict for a slot that closed without any tap from its voice.
#[inline(always)]
pub fn judge_silence(current: Verdict, expected: NoteValue) -> Verdict {
    if current.is_set() {
        return current;
    }
    if expected.expects_input() { Verdict::Incorrect } else { Verdict::Correct }
}
