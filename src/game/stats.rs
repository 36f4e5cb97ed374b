use crate::game::judgment::{Verdict, Verdicts};

/// Lifetime tallies across finished bars.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub count_ok: u64,
    pub count_fail: u64,
}

impl Stats {
    /// Folds one finished bar into the tallies. Every verdict must be resolved.
    pub fn fold(&mut self, left: &Verdicts, right: &Verdicts) {
        for verdict in left.iter().chain(right.iter()) {
            match verdict {
                Verdict::Incorrect => self.count_fail += 1,
                Verdict::Correct => self.count_ok += 1,
                Verdict::Unset => panic!("unresolved verdict reached the statistics: {:?} / {:?}", left, right),
            }
        }
    }

    #[inline(always)]
    pub fn total(&self) -> u64 {
        self.count_ok + self.count_fail
    }

    /// Percentage of correct slots, or `None` before anything has been judged.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.count_ok as f64 / total as f64 * 100.0)
    }
}
