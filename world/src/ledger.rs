//! Resource ledger: gold, lives, score, and session counters.

use endless_siege_core::{Gold, ResourceSnapshot};

/// Score multiplier applied to gold earned from kills.
const KILL_SCORE_FACTOR: u64 = 10;
/// Score multiplier applied to gold earned from wave bonuses.
const BONUS_SCORE_FACTOR: u64 = 5;

#[derive(Clone, Debug)]
pub(crate) struct Ledger {
    gold: Gold,
    lives: u32,
    score: u64,
    enemies_killed: u32,
    waves_completed: u32,
}

impl Ledger {
    pub(crate) fn new(starting_gold: Gold, starting_lives: u32) -> Self {
        Self {
            gold: starting_gold,
            lives: starting_lives,
            score: 0,
            enemies_killed: 0,
            waves_completed: 0,
        }
    }

    pub(crate) fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn can_afford(&self, cost: Gold) -> bool {
        self.gold >= cost
    }

    /// Debits the cost. Callers must check affordability first.
    pub(crate) fn debit(&mut self, cost: Gold) {
        self.gold = self.gold.saturating_sub(cost);
    }

    /// Credits gold for a kill and scores it at the kill multiplier.
    pub(crate) fn credit_kill(&mut self, reward: Gold) {
        self.gold = self.gold.saturating_add(reward);
        self.score += u64::from(reward.get()) * KILL_SCORE_FACTOR;
        self.enemies_killed += 1;
    }

    /// Credits a wave bonus and scores it at the bonus multiplier.
    pub(crate) fn credit_wave_bonus(&mut self, bonus: Gold) {
        self.gold = self.gold.saturating_add(bonus);
        self.score += u64::from(bonus.get()) * BONUS_SCORE_FACTOR;
        self.waves_completed += 1;
    }

    /// Credits a sale refund without scoring it.
    pub(crate) fn credit_refund(&mut self, refund: Gold) {
        self.gold = self.gold.saturating_add(refund);
    }

    /// Deducts one life; reports the remaining count.
    pub(crate) fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub(crate) fn is_defeated(&self) -> bool {
        self.lives == 0
    }

    pub(crate) fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            gold: self.gold,
            lives: self.lives,
            score: self.score,
            enemies_killed: self.enemies_killed,
            waves_completed: self.waves_completed,
        }
    }
}
