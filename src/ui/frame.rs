use crate::config::WINDOW_TITLE;
use crate::game::gameplay::State;
use crate::game::judgment::{Verdict, Verdicts};
use crate::game::note::{BAR_SLOTS, Mode, NoteValue, Pattern, Voice};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotTint {
    Highlight,
    Correct,
    Incorrect,
    Pending,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VoiceRow {
    pub pattern: Pattern,
    pub verdicts: Verdicts,
}

/// Everything the renderer needs for one picture of the trainer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub rows: [VoiceRow; 2],
    pub pos: usize,
    pub mode: Mode,
    pub bpm: u32,
    pub accuracy: Option<f64>,
    pub highlight: bool,
}

impl Frame {
    pub fn capture(state: &State) -> Self {
        let row = |voice: Voice| VoiceRow {
            pattern: *state.bar.pattern(voice),
            verdicts: state.verdicts[voice.index()],
        };
        Self {
            rows: [row(Voice::Left), row(Voice::Right)],
            pos: state.pos,
            mode: state.settings.mode,
            bpm: state.settings.bpm(),
            accuracy: state.stats.accuracy(),
            highlight: state.options.highlight_current_slot && !state.settings.mode.is_expert(),
        }
    }

    #[inline(always)]
    pub fn row(&self, voice: Voice) -> &VoiceRow {
        &self.rows[voice.index()]
    }

    pub fn tint(&self, voice: Voice, slot: usize) -> SlotTint {
        if self.highlight && slot == self.pos {
            return SlotTint::Highlight;
        }
        match self.row(voice).verdicts[slot] {
            Verdict::Correct => SlotTint::Correct,
            Verdict::Incorrect => SlotTint::Incorrect,
            Verdict::Unset => SlotTint::Pending,
        }
    }

    /// Both hands expect silence at the current slot, so a marker shows where the count is.
    pub fn silent_marker(&self) -> bool {
        self.highlight
            && self.pos < BAR_SLOTS
            && self.rows.iter().all(|row| row.pattern.slot(self.pos) == NoteValue::Rest)
    }

    /// Status line shown in the top right corner.
    pub fn header(&self) -> String {
        format!("press 'q' to exit | {} BPM | {}", self.bpm, self.mode.label())
    }

    /// Whole-percent accuracy, padded to three digits, once anything was judged.
    pub fn accuracy_label(&self) -> Option<String> {
        self.accuracy.map(|acc| format!("{:3}%", acc as u32))
    }

    pub fn title(&self) -> String {
        let mut title = format!("{} | {}", WINDOW_TITLE, self.header());
        if let Some(label) = self.accuracy_label() {
            title.push_str(" | ");
            title.push_str(&label);
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NoteValue::*;

    fn frame(left: Pattern, right: Pattern, pos: usize, highlight: bool) -> Frame {
        Frame {
            rows: [
                VoiceRow { pattern: left, verdicts: [Verdict::Unset; 4] },
                VoiceRow { pattern: right, verdicts: [Verdict::Unset; 4] },
            ],
            pos,
            mode: if highlight { Mode::Simple } else { Mode::Expert },
            bpm: 116,
            accuracy: None,
            highlight,
        }
    }

    #[test]
    fn highlight_beats_verdict_colouring() {
        let mut f = frame(Pattern::from_values(&[Quarter; 4]), Pattern::from_values(&[Quarter; 4]), 1, true);
        f.rows[0].verdicts = [Verdict::Correct, Verdict::Correct, Verdict::Unset, Verdict::Unset];
        f.rows[1].verdicts = [Verdict::Incorrect, Verdict::Unset, Verdict::Unset, Verdict::Unset];
        assert_eq!(f.tint(Voice::Left, 0), SlotTint::Correct);
        assert_eq!(f.tint(Voice::Left, 1), SlotTint::Highlight);
        assert_eq!(f.tint(Voice::Right, 0), SlotTint::Incorrect);
        assert_eq!(f.tint(Voice::Right, 2), SlotTint::Pending);
    }

    #[test]
    fn expert_frames_never_highlight() {
        let f = frame(Pattern::from_values(&[Rest; 4]), Pattern::from_values(&[Rest; 4]), 1, false);
        assert_eq!(f.tint(Voice::Left, 1), SlotTint::Pending);
        assert!(!f.silent_marker());
    }

    #[test]
    fn marker_needs_both_hands_silent() {
        let f = frame(Pattern::from_values(&[Whole]), Pattern::from_values(&[EighthPair, Quarter, Quarter]), 1, true);
        assert!(f.silent_marker());
        let f = frame(Pattern::from_values(&[Whole]), Pattern::from_values(&[EighthPair, Quarter, Quarter]), 2, true);
        assert!(!f.silent_marker());
        let f = frame(Pattern::from_values(&[Whole]), Pattern::from_values(&[Whole]), 4, true);
        assert!(!f.silent_marker());
    }

    #[test]
    fn header_and_accuracy_labels() {
        let mut f = frame(Pattern::from_values(&[Whole]), Pattern::from_values(&[Whole]), 0, true);
        assert_eq!(f.header(), "press 'q' to exit | 116 BPM | beginner");
        assert_eq!(f.accuracy_label(), None);
        f.accuracy = Some(100.0);
        assert_eq!(f.accuracy_label().as_deref(), Some("100%"));
        f.accuracy = Some(4.9);
        assert_eq!(f.accuracy_label().as_deref(), Some("  4%"));
    }

    #[test]
    fn title_shows_accuracy_once_there_is_some() {
        let mut f = frame(Pattern::from_values(&[Whole]), Pattern::from_values(&[Whole]), 0, true);
        assert_eq!(f.title(), "Tap-trainer | press 'q' to exit | 116 BPM | beginner");
        f.accuracy = Some(87.5);
        f.mode = Mode::Expert;
        assert_eq!(f.title(), "Tap-trainer | press 'q' to exit | 116 BPM | expert |  87%");
    }
}
