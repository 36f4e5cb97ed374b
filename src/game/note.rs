/// Number of slots in one bar, for either voice.
pub const BAR_SLOTS: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoteValue {
    Rest,
    Quarter,
    EighthPair,
    Whole,
}

impl NoteValue {
    /// How many slots this value occupies, counting the silent slots it reserves.
    #[inline(always)]
    pub const fn span(self) -> usize {
        match self {
            NoteValue::Rest | NoteValue::Quarter => 1,
            NoteValue::EighthPair => 2,
            NoteValue::Whole => 4,
        }
    }

    #[inline(always)]
    pub const fn expects_input(self) -> bool {
        !matches!(self, NoteValue::Rest)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Voice {
    Left = 0,
    Right = 1,
}

impl Voice {
    pub const ALL: [Voice; 2] = [Voice::Left, Voice::Right];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Simple,
    Expert,
}

impl Mode {
    #[inline(always)]
    pub const fn is_expert(self) -> bool {
        matches!(self, Mode::Expert)
    }

    pub const fn toggled(self) -> Mode {
        match self {
            Mode::Simple => Mode::Expert,
            Mode::Expert => Mode::Simple,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mode::Simple => "beginner",
            Mode::Expert => "expert",
        }
    }
}

/// One voice's bar. Multi-slot values are followed by `Rest` in the slots they reserve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    slots: [NoteValue; BAR_SLOTS],
}

impl Pattern {
    /// Builds a pattern from raw slots, panicking if the layout is impossible.
    pub fn from_slots(slots: [NoteValue; BAR_SLOTS]) -> Self {
        let pattern = Self { slots };
        if let Err(msg) = pattern.validate() {
            panic!("malformed pattern {:?}: {}", slots, msg);
        }
        pattern
    }

    #[inline(always)]
    pub fn slot(&self, pos: usize) -> NoteValue {
        self.slots[pos]
    }

    #[inline(always)]
    pub fn starts_silent(&self) -> bool {
        self.slots[0] == NoteValue::Rest
    }

    fn validate(&self) -> Result<(), String> {
        let mut start = 0;
        while start < BAR_SLOTS {
            let value = self.slots[start];
            match value {
                NoteValue::Whole if start != 0 => {
                    return Err(format!("whole note at slot {}", start));
                }
                NoteValue::EighthPair if start >= BAR_SLOTS - 1 => {
                    return Err(format!("eighth pair at slot {} overflows the bar", start));
                }
                _ => {}
            }
            for reserved in start + 1..start + value.span() {
                if self.slots[reserved] != NoteValue::Rest {
                    return Err(format!("slot {} is reserved but holds {:?}", reserved, self.slots[reserved]));
                }
            }
            start += value.span();
        }
        Ok(())
    }
}

#[cfg(test)]
impl Pattern {
    /// Lays out a sequence of note values left to right, filling reserved slots with `Rest`.
    pub fn from_values(values: &[NoteValue]) -> Self {
        let mut slots = [NoteValue::Rest; BAR_SLOTS];
        let mut len = 0;
        for &value in values {
            assert!(
                len + value.span() <= BAR_SLOTS,
                "note values {:?} overflow a {}-slot bar",
                values,
                BAR_SLOTS
            );
            slots[len] = value;
            len += value.span();
        }
        assert_eq!(len, BAR_SLOTS, "note values {:?} do not fill the bar", values);
        Self::from_slots(slots)
    }

    #[inline(always)]
    pub fn slots(&self) -> &[NoteValue; BAR_SLOTS] {
        &self.slots
    }

    /// True when `pos` is a silent slot reserved by an `EighthPair` or `Whole`
    /// rather than an independent rest.
    pub fn is_reserved(&self, pos: usize) -> bool {
        let mut start = 0;
        while start < BAR_SLOTS {
            let span = self.slots[start].span();
            if pos > start && pos < start + span {
                return true;
            }
            start += span;
        }
        false
    }
}
