//! Energy-based turn scheduling
//!
//! Every tick an actor banks energy according to its speed; once it has
//! banked an action's worth it may act. Leftover energy carries over, which
//! is what lets a fast actor squeeze in two moves for a slow one's one.

use crate::{ACTION_COST, ENERGY_GAINS, NORMAL_SPEED};

/// Per-actor energy accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergyClock {
    current: i32,
    action_cost: i32,
    normal_speed: i32,
    gains: &'static [i32],
}

impl Default for EnergyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyClock {
    /// A clock on the standard speed table, starting empty.
    pub const fn new() -> Self {
        Self {
            current: 0,
            action_cost: ACTION_COST,
            normal_speed: NORMAL_SPEED,
            gains: &ENERGY_GAINS,
        }
    }

    /// A clock with a custom cost and gain table.
    pub fn with_table(action_cost: i32, normal_speed: i32, gains: &'static [i32]) -> Self {
        assert!(action_cost > 0, "action cost must be positive, got {action_cost}");
        assert!(!gains.is_empty(), "energy gain table must not be empty");
        Self {
            current: 0,
            action_cost,
            normal_speed,
            gains,
        }
    }

    /// Start with a full action banked so the owner can act on the first tick.
    #[must_use]
    pub fn preloaded(mut self) -> Self {
        self.current = self.action_cost;
        self
    }

    pub const fn current(&self) -> i32 {
        self.current
    }

    pub const fn action_cost(&self) -> i32 {
        self.action_cost
    }

    /// Energy gained per tick at `speed` tiers above (or below) normal.
    pub fn gain(&self, speed: i32) -> i32 {
        let tier = (self.normal_speed + speed).clamp(0, self.gains.len() as i32 - 1);
        self.gains[tier as usize]
    }

    /// Bank one tick's worth of energy. Returns whether the owner can now act.
    pub fn accumulate(&mut self, speed: i32) -> bool {
        self.current += self.gain(speed);
        self.is_ready()
    }

    pub const fn is_ready(&self) -> bool {
        self.current >= self.action_cost
    }

    /// Pay for one action; any surplus stays banked.
    pub fn spend(&mut self) {
        assert!(
            self.is_ready(),
            "spent energy without a full action banked ({}/{})",
            self.current,
            self.action_cost
        );
        self.current -= self.action_cost;
    }

    /// Average number of ticks between turns at `speed`.
    pub fn ticks_per_turn(&self, speed: i32) -> f64 {
        self.action_cost as f64 / self.gain(speed) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEN_PER_TICK: [i32; 1] = [10];

    #[test]
    fn test_ready_after_exact_ticks() {
        let mut clock = EnergyClock::with_table(100, 0, &TEN_PER_TICK);
        for _ in 0..9 {
            assert!(!clock.accumulate(0));
        }
        assert!(clock.accumulate(0));
        assert_eq!(clock.current(), 100);
    }

    #[test]
    fn test_surplus_carries_over() {
        let mut clock = EnergyClock::with_table(100, 0, &TEN_PER_TICK);
        for _ in 0..10 {
            clock.accumulate(0);
        }
        clock.current += 5;
        assert_eq!(clock.current(), 105);
        clock.spend();
        assert_eq!(clock.current(), 5);
        assert!(!clock.is_ready());
    }

    #[test]
    fn test_speed_is_clamped_to_table() {
        let clock = EnergyClock::new();
        assert_eq!(clock.gain(0), 60);
        assert_eq!(clock.gain(100), 240);
        assert_eq!(clock.gain(-100), 15);
        assert_eq!(clock.ticks_per_turn(0), 4.0);
        assert_eq!(clock.ticks_per_turn(6), 1.0);
    }

    #[test]
    fn test_faster_actor_catches_up() {
        let mut slow = EnergyClock::new();
        let mut fast = EnergyClock::new();
        let mut slow_turns = 0;
        let mut fast_turns = 0;
        for _ in 0..48 {
            if slow.accumulate(0) {
                slow.spend();
                slow_turns += 1;
            }
            if fast.accumulate(2) {
                fast.spend();
                fast_turns += 1;
            }
        }
        assert_eq!(slow_turns, 12);
        assert_eq!(fast_turns, 20);
    }

    #[test]
    fn test_preloaded_is_ready() {
        let clock = EnergyClock::new().preloaded();
        assert!(clock.is_ready());
    }

    #[test]
    #[should_panic(expected = "without a full action")]
    fn test_spend_when_not_ready_panics() {
        EnergyClock::new().spend();
    }
}
