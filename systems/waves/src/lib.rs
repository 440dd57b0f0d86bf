#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduling: deterministic composition, spawn cadence, completion.
//!
//! The scheduler owns the wave state machine. Waves start manually through
//! [`WaveScheduler::start_wave`]; once started, [`WaveScheduler::handle`]
//! tracks simulation time from [`Event::TimeAdvanced`] broadcasts, emits
//! [`Command::SpawnEnemy`] batches when spawn offsets come due, and emits a
//! single [`Command::CreditWaveBonus`] when the last scheduled enemy has
//! spawned and no live enemy remains on the playfield.
//!
//! Composition is a pure function of the wave number and the session seed:
//! the archetype mix follows fixed difficulty thresholds, and emission order
//! is shuffled with a ChaCha8 stream keyed by SHA-256 of (seed, wave), so
//! identical inputs replay identical waves.

use std::time::Duration;

use endless_siege_core::{
    Command, EnemyKind, EnemyView, Event, Gold, StartWaveError, WaveId, WaveStatus,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Hard cap on enemies per wave.
const MAX_WAVE_SIZE: u32 = 30;
/// Floor for the inter-spawn delay on late waves.
const MIN_SPAWN_DELAY: Duration = Duration::from_millis(300);
/// Gold credited per wave number on completion.
const BONUS_PER_WAVE: u32 = 5;

/// Manual-start wave state machine.
#[derive(Clone, Debug)]
pub struct WaveScheduler {
    seed: u64,
    wave: WaveId,
    active: bool,
    plan: Vec<EnemyKind>,
    spawn_delay: Duration,
    wave_started_at: Duration,
    clock: Duration,
    spawned: u32,
}

impl WaveScheduler {
    /// Creates an idle scheduler bound to the provided session seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            wave: WaveId::new(0),
            active: false,
            plan: Vec::new(),
            spawn_delay: Duration::ZERO,
            wave_started_at: Duration::ZERO,
            clock: Duration::ZERO,
            spawned: 0,
        }
    }

    /// Begins the next wave, failing while one is still being fought.
    pub fn start_wave(&mut self) -> Result<WaveId, StartWaveError> {
        if self.active {
            return Err(StartWaveError::WaveActive);
        }

        self.wave = self.wave.next();
        self.plan = composition(self.wave, self.seed);
        self.spawn_delay = spawn_delay(self.wave);
        self.wave_started_at = self.clock;
        self.spawned = 0;
        self.active = true;
        Ok(self.wave)
    }

    /// Consumes world events and emits due spawns and completion credit.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        out_commands: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => self.clock += *dt,
                Event::SimulationReset => {
                    let seed = self.seed;
                    *self = Self::new(seed);
                }
                _ => {}
            }
        }

        if !self.active {
            return;
        }

        let elapsed = self.clock.saturating_sub(self.wave_started_at);
        let mut emitted = 0u32;
        while (self.spawned as usize) < self.plan.len() {
            let offset = self.spawn_delay * self.spawned;
            if elapsed < offset {
                break;
            }
            out_commands.push(Command::SpawnEnemy {
                kind: self.plan[self.spawned as usize],
            });
            self.spawned += 1;
            emitted += 1;
        }

        // Completion is only checked on calls that spawned nothing, so the
        // final enemy is visible in the snapshot before the wave can close.
        if emitted == 0
            && self.spawned as usize == self.plan.len()
            && enemies.iter().all(|enemy| !enemy.is_active())
        {
            self.active = false;
            out_commands.push(Command::CreditWaveBonus {
                wave: self.wave,
                bonus: Gold::new(self.wave.get().saturating_mul(BONUS_PER_WAVE)),
            });
        }
    }

    /// Progress report for adapters.
    #[must_use]
    pub fn status(&self) -> WaveStatus {
        WaveStatus {
            wave: self.wave,
            active: self.active,
            spawned: self.spawned,
            total: self.plan.len() as u32,
        }
    }
}

/// Inter-spawn delay for a wave: tightens by 20ms per wave to a 300ms floor.
#[must_use]
pub fn spawn_delay(wave: WaveId) -> Duration {
    let millis = 1_000u64
        .saturating_sub(u64::from(wave.get()) * 20)
        .max(MIN_SPAWN_DELAY.as_millis() as u64);
    Duration::from_millis(millis)
}

/// Deterministic enemy roster for a wave under the provided session seed.
///
/// The archetype mix depends only on the wave number; the seed controls the
/// emission order.
#[must_use]
pub fn composition(wave: WaveId, seed: u64) -> Vec<EnemyKind> {
    let number = wave.get();
    let count = (5 + number * 12 / 10).min(MAX_WAVE_SIZE);

    let mut roster = Vec::with_capacity(count as usize);
    if number <= 3 {
        roster.extend(std::iter::repeat(EnemyKind::Basic).take(count as usize));
    } else if number <= 7 {
        let fast = count * 3 / 10;
        roster.extend(std::iter::repeat(EnemyKind::Basic).take((count - fast) as usize));
        roster.extend(std::iter::repeat(EnemyKind::Fast).take(fast as usize));
    } else if number <= 15 {
        let armored = count * 2 / 10;
        let fast = count * 3 / 10;
        roster.extend(std::iter::repeat(EnemyKind::Basic).take((count - armored - fast) as usize));
        roster.extend(std::iter::repeat(EnemyKind::Fast).take(fast as usize));
        roster.extend(std::iter::repeat(EnemyKind::Armored).take(armored as usize));
    } else {
        let bosses = if number % 5 == 0 { number / 10 } else { 0 };
        let armored = count * 25 / 100;
        let fast = count * 35 / 100;
        let basic = count.saturating_sub(armored + fast + bosses);
        roster.extend(std::iter::repeat(EnemyKind::Basic).take(basic as usize));
        roster.extend(std::iter::repeat(EnemyKind::Fast).take(fast as usize));
        roster.extend(std::iter::repeat(EnemyKind::Armored).take(armored as usize));
        roster.extend(std::iter::repeat(EnemyKind::Boss).take(bosses as usize));
    }

    let mut rng = ChaCha8Rng::from_seed(derive_seed(seed, wave));
    roster.shuffle(&mut rng);
    roster
}

/// Expands (session seed, wave number) into a 256-bit RNG seed.
fn derive_seed(seed: u64, wave: WaveId) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(wave.get().to_le_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn early_waves_are_all_basic() {
        let roster = composition(WaveId::new(1), 42);
        assert_eq!(roster.len(), 6);
        assert!(roster.iter().all(|kind| *kind == EnemyKind::Basic));
    }

    #[test]
    fn middle_waves_mix_in_fast_enemies() {
        let roster = composition(WaveId::new(5), 42);
        assert_eq!(roster.len(), 11);
        let fast = roster
            .iter()
            .filter(|kind| **kind == EnemyKind::Fast)
            .count();
        assert_eq!(fast, 3);
    }

    #[test]
    fn every_fifth_late_wave_carries_bosses() {
        let roster = composition(WaveId::new(20), 42);
        let bosses = roster
            .iter()
            .filter(|kind| **kind == EnemyKind::Boss)
            .count();
        assert_eq!(bosses, 2);

        let off_cycle = composition(WaveId::new(21), 42);
        assert!(!off_cycle.contains(&EnemyKind::Boss));
    }

    #[test]
    fn wave_size_caps_at_thirty() {
        assert_eq!(composition(WaveId::new(40), 42).len(), 30);
    }

    #[test]
    fn identical_inputs_replay_identical_rosters() {
        assert_eq!(
            composition(WaveId::new(12), 7),
            composition(WaveId::new(12), 7)
        );
    }

    #[test]
    fn the_seed_only_permutes_the_roster() {
        let left = composition(WaveId::new(12), 1);
        let right = composition(WaveId::new(12), 2);

        let sorted = |mut roster: Vec<EnemyKind>| {
            roster.sort();
            roster
        };
        assert_eq!(sorted(left), sorted(right));
    }

    #[test]
    fn spawn_delay_floors_at_three_hundred_millis() {
        assert_eq!(spawn_delay(WaveId::new(1)), Duration::from_millis(980));
        assert_eq!(spawn_delay(WaveId::new(35)), Duration::from_millis(300));
        assert_eq!(spawn_delay(WaveId::new(100)), Duration::from_millis(300));
    }

    #[test]
    fn starting_a_wave_while_active_is_rejected() {
        let mut scheduler = WaveScheduler::new(42);
        assert_eq!(scheduler.start_wave(), Ok(WaveId::new(1)));
        assert_eq!(scheduler.start_wave(), Err(StartWaveError::WaveActive));
    }

    #[test]
    fn reset_event_returns_the_scheduler_to_wave_zero() {
        let mut scheduler = WaveScheduler::new(42);
        let _ = scheduler.start_wave().expect("idle scheduler starts");

        let mut commands = Vec::new();
        scheduler.handle(
            &[Event::SimulationReset],
            &EnemyView::default(),
            &mut commands,
        );

        let status = scheduler.status();
        assert_eq!(status.wave, WaveId::new(0));
        assert!(!status.active);
    }
}
