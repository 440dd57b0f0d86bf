//! Enemy path-following, status effects, and lifecycle bookkeeping.

use endless_siege_core::{EnemyId, EnemyKind, EnemySnapshot, Health, SlowParams, WorldPoint};
use glam::Vec2;

/// Arrival tolerance for waypoint snapping, kept well under one world unit
/// so slow archetypes still land exactly on waypoints.
const ARRIVAL_EPSILON: f32 = 1e-3;

/// Outcome of advancing a single enemy by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The enemy moved (or stood still) without reaching the base.
    Travelling,
    /// The enemy arrived at the final waypoint this tick.
    ReachedEnd,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
    health: Health,
    path_index: usize,
    alive: bool,
    reached_end: bool,
    slow_multiplier: f32,
    slow_remaining: u32,
}

impl Enemy {
    pub(crate) fn id(&self) -> EnemyId {
        self.id
    }

    pub(crate) fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub(crate) fn position(&self) -> WorldPoint {
        WorldPoint::new(self.position.x, self.position.y)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.alive && !self.reached_end
    }

    /// Advances the slow timer and moves the enemy one step along the path.
    pub(crate) fn step(&mut self, waypoints: &[WorldPoint]) -> StepOutcome {
        if !self.is_active() {
            return StepOutcome::Travelling;
        }

        if self.slow_remaining > 0 {
            self.slow_remaining -= 1;
            if self.slow_remaining == 0 {
                self.slow_multiplier = 1.0;
            }
        }

        let Some(target) = waypoints.get(self.path_index + 1) else {
            self.reached_end = true;
            return StepOutcome::ReachedEnd;
        };

        let target = Vec2::new(target.x(), target.y());
        let offset = target - self.position;
        let distance = offset.length();
        let step = self.kind.stats().speed * self.slow_multiplier;

        if distance <= step.max(ARRIVAL_EPSILON) {
            self.position = target;
            self.path_index += 1;
            if self.path_index + 1 >= waypoints.len() {
                self.reached_end = true;
                return StepOutcome::ReachedEnd;
            }
        } else {
            self.position += offset / distance * step;
        }

        StepOutcome::Travelling
    }

    /// Applies damage; reports whether the hit was lethal.
    pub(crate) fn take_damage(&mut self, damage: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health.is_zero() {
            self.alive = false;
            return true;
        }
        false
    }

    /// Applies a slow effect. Durations never shorten an active effect and
    /// multipliers never weaken one.
    pub(crate) fn apply_slow(&mut self, params: SlowParams) {
        self.slow_remaining = self.slow_remaining.max(params.duration_ticks);
        self.slow_multiplier = self.slow_multiplier.min(params.multiplier);
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position(),
            health: self.health,
            max_health: self.kind.stats().max_health,
            path_index: self.path_index,
            alive: self.alive,
            reached_end: self.reached_end,
            slow_multiplier: self.slow_multiplier,
            slow_remaining: self.slow_remaining,
        }
    }
}

/// Owning collection of enemies with monotonically allocated identifiers.
#[derive(Clone, Debug, Default)]
pub(crate) struct EnemyRegistry {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyRegistry {
    /// Spawns a new enemy of the provided archetype at the path origin.
    pub(crate) fn spawn(&mut self, kind: EnemyKind, spawn_point: WorldPoint) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy {
            id,
            kind,
            position: Vec2::new(spawn_point.x(), spawn_point.y()),
            health: kind.stats().max_health,
            path_index: 0,
            alive: true,
            reached_end: false,
            slow_multiplier: 1.0,
            slow_remaining: 0,
        });
        id
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    /// Drops every enemy that reached a terminal state on a previous tick.
    pub(crate) fn cull(&mut self) {
        self.enemies.retain(Enemy::is_active);
    }

    pub(crate) fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.enemies.iter().map(Enemy::snapshot).collect()
    }
}
