use crate::game::note::{Mode, Pattern, Voice};
use crate::game::pattern;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    pub left: Pattern,
    pub right: Pattern,
}

impl Bar {
    #[inline(always)]
    pub fn pattern(&self, voice: Voice) -> &Pattern {
        match voice {
            Voice::Left => &self.left,
            Voice::Right => &self.right,
        }
    }
}

/// Draws a left/right pair. One voice is picked as primary and drawn first; the
/// other may only open with a rest if the primary did not, so the downbeat is
/// never silent on both hands.
pub fn compose<R: Rng + ?Sized>(rng: &mut R, mode: Mode) -> Bar {
    let primary_voice = if rng.random_bool(0.5) { Voice::Left } else { Voice::Right };

    let primary = pattern::generate(rng, true, mode);
    let secondary = pattern::generate(rng, !primary.starts_silent(), mode);

    let bar = match primary_voice {
        Voice::Left => Bar { left: primary, right: secondary },
        Voice::Right => Bar { left: secondary, right: primary },
    };
    debug_assert!(!(bar.left.starts_silent() && bar.right.starts_silent()));
    log::debug!("Composed {:?} bar, primary {:?}: {:?}", mode, primary_voice, bar);
    bar
}
