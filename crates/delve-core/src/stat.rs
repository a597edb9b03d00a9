//! Clamped current/max stat pairs

use serde::Serialize;

/// A stat with a current value that never leaves `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatRange {
    current: i32,
    max: i32,
}

impl StatRange {
    /// A full stat with the given maximum. Negative maximums clamp to 0.
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// A stat with an explicit current value, clamped into range.
    pub fn with_current(current: i32, max: i32) -> Self {
        let mut stat = Self::new(max);
        stat.set_current(current);
        stat
    }

    pub const fn current(&self) -> i32 {
        self.current
    }

    pub const fn max(&self) -> i32 {
        self.max
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Change the maximum, pulling the current value down if needed.
    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(0);
        self.current = self.current.min(self.max);
    }

    /// Lower the current value, returning how much was actually removed.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.set_current(before.saturating_sub(amount.max(0)));
        before - self.current
    }

    /// Raise the current value, returning how much was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.set_current(before.saturating_add(amount.max(0)));
        self.current - before
    }

    /// Current as a fraction of max, 0.0 for an empty range.
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }

    pub const fn is_full(&self) -> bool {
        self.current == self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_full() {
        let stat = StatRange::new(12);
        assert_eq!(stat.current(), 12);
        assert!(stat.is_full());
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut stat = StatRange::new(8);
        assert_eq!(stat.damage(10), 8);
        assert_eq!(stat.current(), 0);
        assert!(stat.is_empty());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut stat = StatRange::with_current(3, 10);
        assert_eq!(stat.heal(20), 7);
        assert!(stat.is_full());
    }

    #[test]
    fn test_shrinking_max_pulls_current() {
        let mut stat = StatRange::new(10);
        stat.set_max(4);
        assert_eq!(stat.current(), 4);
        stat.set_max(-3);
        assert_eq!(stat.max(), 0);
        assert_eq!(stat.current(), 0);
        assert_eq!(stat.fraction(), 0.0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Damage(i32),
        Heal(i32),
        SetCurrent(i32),
        SetMax(i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-50..200i32).prop_map(Op::Damage),
            (-50..200i32).prop_map(Op::Heal),
            (-100..300i32).prop_map(Op::SetCurrent),
            (-20..150i32).prop_map(Op::SetMax),
        ]
    }

    proptest! {
        #[test]
        fn current_stays_within_bounds(max in -10..100i32, ops in prop::collection::vec(op(), 0..40)) {
            let mut stat = StatRange::new(max);
            prop_assert!(stat.current() >= 0 && stat.current() <= stat.max() && stat.max() >= 0);
            for op in ops {
                match op {
                    Op::Damage(n) => { stat.damage(n); }
                    Op::Heal(n) => { stat.heal(n); }
                    Op::SetCurrent(n) => stat.set_current(n),
                    Op::SetMax(n) => stat.set_max(n),
                }
                prop_assert!(stat.current() >= 0);
                prop_assert!(stat.current() <= stat.max());
                prop_assert!(stat.max() >= 0);
            }
        }
    }
}
