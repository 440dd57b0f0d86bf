#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Endless Siege.
//!
//! The [`World`] owns the placement grid, every entity collection, and the
//! resource ledger. All mutation funnels through [`apply`], which executes a
//! single [`Command`] and appends the resulting [`Event`]s to the caller's
//! buffer. Read access goes through the [`query`] module, which captures
//! deterministic snapshots for pure systems and adapters.

use std::time::Duration;

use endless_siege_core::{Command, Event, Gold, PlacementError, SellError, UpgradeError};

mod enemies;
mod grid;
mod ledger;
mod projectiles;
mod towers;

use enemies::{EnemyRegistry, StepOutcome};
use grid::Grid;
use ledger::Ledger;
use projectiles::{Payload, ProjectileRegistry, OVERSHOOT_MARGIN};
use towers::TowerRegistry;

/// Static parameters the world is rebuilt from on construction and restart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Playfield width in world units.
    pub width: f32,
    /// Playfield height in world units.
    pub height: f32,
    /// Edge length of a square grid cell in world units.
    pub cell_size: f32,
    /// Gold the ledger starts with.
    pub starting_gold: Gold,
    /// Lives the ledger starts with.
    pub starting_lives: u32,
    /// Optional cap on tower levels; `None` leaves upgrades uncapped.
    pub max_tower_level: Option<u32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cell_size: 40.0,
            starting_gold: Gold::new(100),
            starting_lives: 20,
            max_tower_level: None,
        }
    }
}

/// Authoritative simulation state.
#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    clock: Duration,
    paused: bool,
    game_over: bool,
    grid: Grid,
    enemies: EnemyRegistry,
    towers: TowerRegistry,
    projectiles: ProjectileRegistry,
    ledger: Ledger,
}

impl World {
    /// Builds the initial world from the provided configuration.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            clock: Duration::ZERO,
            paused: false,
            game_over: false,
            grid: Grid::new(config.width, config.height, config.cell_size),
            enemies: EnemyRegistry::default(),
            towers: TowerRegistry::default(),
            projectiles: ProjectileRegistry::default(),
            ledger: Ledger::new(config.starting_gold, config.starting_lives),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Executes a single command against the world, appending resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => tick(world, dt, out_events),
        Command::PlaceTower { kind, cell } => {
            if let Err(reason) = world.grid.can_place(cell) {
                out_events.push(Event::PlacementRejected { kind, cell, reason });
                return;
            }
            if !world.ledger.can_afford(kind.cost()) {
                out_events.push(Event::PlacementRejected {
                    kind,
                    cell,
                    reason: PlacementError::InsufficientFunds,
                });
                return;
            }

            let position = world.grid.cell_center(cell);
            let tower = world.towers.insert(kind, cell, position);
            match world.grid.place(cell, tower) {
                Ok(()) => {
                    world.ledger.debit(kind.cost());
                    out_events.push(Event::TowerPlaced { tower, kind, cell });
                }
                Err(reason) => {
                    let _ = world.towers.remove(tower);
                    out_events.push(Event::PlacementRejected { kind, cell, reason });
                }
            }
        }
        Command::UpgradeTower { tower } => {
            let Some(existing) = world.towers.get(tower) else {
                out_events.push(Event::UpgradeRejected {
                    tower,
                    reason: UpgradeError::MissingTower,
                });
                return;
            };
            let kind = existing.kind();
            let level = existing.level();

            if let Some(cap) = world.config.max_tower_level {
                if level >= cap {
                    out_events.push(Event::UpgradeRejected {
                        tower,
                        reason: UpgradeError::MaxLevel,
                    });
                    return;
                }
            }

            let cost = kind.upgrade_cost(level);
            if !world.ledger.can_afford(cost) {
                out_events.push(Event::UpgradeRejected {
                    tower,
                    reason: UpgradeError::InsufficientFunds,
                });
                return;
            }

            if let Some(existing) = world.towers.get_mut(tower) {
                let level = existing.promote();
                world.ledger.debit(cost);
                out_events.push(Event::TowerUpgraded { tower, level });
            }
        }
        Command::SellTower { tower } => {
            let Some(sold) = world.towers.remove(tower) else {
                out_events.push(Event::SellRejected {
                    tower,
                    reason: SellError::MissingTower,
                });
                return;
            };
            let _ = world.grid.remove(sold.cell());
            let refund = sold.kind().sell_refund();
            world.ledger.credit_refund(refund);
            out_events.push(Event::TowerSold { tower, refund });
        }
        Command::TogglePause => {
            world.paused = !world.paused;
            out_events.push(Event::PauseToggled {
                paused: world.paused,
            });
        }
        Command::Restart => {
            *world = World::new(world.config);
            out_events.push(Event::SimulationReset);
        }
        Command::SpawnEnemy { kind } => {
            if world.game_over {
                return;
            }
            let position = world.grid.spawn_point();
            let enemy = world.enemies.spawn(kind, position);
            out_events.push(Event::EnemySpawned {
                enemy,
                kind,
                position,
            });
        }
        Command::FireProjectile { tower, target } => {
            // Stale identifiers from systems reacting to old snapshots are
            // tolerated as silent no-ops.
            let Some(firing) = world.towers.get(tower) else {
                return;
            };
            if !firing.ready_to_fire() {
                return;
            }
            let kind = firing.kind();
            let level = firing.level();
            let origin = firing.position();

            let Some(enemy) = world.enemies.get(target) else {
                return;
            };
            if !enemy.is_active() {
                return;
            }
            let aim = enemy.position();

            let payload = if let Some(params) = kind.slow_params(level) {
                Payload::Slow(params)
            } else if let Some(radius) = kind.blast_radius(level) {
                Payload::Blast { radius }
            } else {
                Payload::Direct
            };

            let projectile = world.projectiles.launch(
                kind.projectile_kind(),
                origin,
                aim,
                kind.projectile_speed(),
                kind.damage(level),
                payload,
            );
            if let Some(firing) = world.towers.get_mut(tower) {
                firing.start_cooldown();
            }
            out_events.push(Event::ProjectileFired {
                projectile,
                tower,
                target,
            });
        }
        Command::CreditWaveBonus { wave, bonus } => {
            let total = bonus.saturating_add(Gold::new(wave.get().saturating_mul(2)));
            world.ledger.credit_wave_bonus(total);
            out_events.push(Event::WaveCompleted { wave, bonus: total });
        }
    }
}

/// Advances the simulation by one tick. A no-op while paused or after the
/// base has fallen; terminal entities from the previous tick are culled
/// before any movement happens, so they stay visible in snapshots for
/// exactly one tick.
fn tick(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    if world.paused || world.game_over {
        return;
    }

    world.enemies.cull();
    world.projectiles.cull();

    world.clock += dt;
    out_events.push(Event::TimeAdvanced { dt });

    world.towers.advance_cooldowns(dt);

    let waypoints = world.grid.waypoints().to_vec();
    let mut escaped = Vec::new();
    for enemy in world.enemies.iter_mut() {
        if enemy.step(&waypoints) == StepOutcome::ReachedEnd {
            escaped.push(enemy.id());
        }
    }
    for enemy in escaped {
        let lives_remaining = world.ledger.lose_life();
        out_events.push(Event::EnemyReachedEnd {
            enemy,
            lives_remaining,
        });
    }

    resolve_projectiles(
        &mut world.projectiles,
        &mut world.enemies,
        &world.grid,
        &mut world.ledger,
        out_events,
    );

    if world.ledger.is_defeated() && !world.game_over {
        world.game_over = true;
        out_events.push(Event::GameOver {
            score: world.ledger.score(),
        });
    }
}

/// Moves every projectile one step and resolves impacts against enemies.
fn resolve_projectiles(
    projectiles: &mut ProjectileRegistry,
    enemies: &mut EnemyRegistry,
    grid: &Grid,
    ledger: &mut Ledger,
    out_events: &mut Vec<Event>,
) {
    for projectile in projectiles.iter_mut() {
        if !projectile.is_alive() {
            continue;
        }
        projectile.advance();
        if !projectile.is_alive() {
            continue;
        }
        if !grid.contains_with_margin(projectile.position(), OVERSHOOT_MARGIN) {
            projectile.expire();
            continue;
        }

        // First overlapping enemy in identifier order takes the hit.
        let impact = enemies
            .iter()
            .find(|enemy| {
                enemy.is_active() && {
                    let reach = projectile.kind().radius() + enemy.kind().stats().radius;
                    projectile.position().distance_to(enemy.position()) <= reach
                }
            })
            .map(|enemy| (enemy.id(), enemy.position()));
        let Some((struck, epicenter)) = impact else {
            continue;
        };
        projectile.expire();

        match projectile.payload() {
            Payload::Direct => {
                damage_enemy(enemies, struck, projectile.damage(), None, ledger, out_events);
            }
            Payload::Slow(params) => {
                damage_enemy(
                    enemies,
                    struck,
                    projectile.damage(),
                    Some(params),
                    ledger,
                    out_events,
                );
            }
            Payload::Blast { radius } => {
                let victims: Vec<_> = enemies
                    .iter()
                    .filter(|enemy| {
                        enemy.is_active() && epicenter.distance_to(enemy.position()) <= radius
                    })
                    .map(|enemy| enemy.id())
                    .collect();
                for victim in victims {
                    damage_enemy(enemies, victim, projectile.damage(), None, ledger, out_events);
                }
            }
        }
    }
}

fn damage_enemy(
    enemies: &mut EnemyRegistry,
    id: endless_siege_core::EnemyId,
    damage: u32,
    slow: Option<endless_siege_core::SlowParams>,
    ledger: &mut Ledger,
    out_events: &mut Vec<Event>,
) {
    let Some(enemy) = enemies.get_mut(id) else {
        return;
    };
    if let Some(params) = slow {
        enemy.apply_slow(params);
    }
    if enemy.take_damage(damage) {
        let stats = enemy.kind().stats();
        let reward = stats.reward.saturating_add(stats.kill_bonus);
        let kind = enemy.kind();
        ledger.credit_kill(reward);
        out_events.push(Event::EnemyKilled {
            enemy: id,
            kind,
            reward,
        });
    }
}

/// Read-only access to world state through deterministic snapshots.
pub mod query {
    use std::time::Duration;

    use endless_siege_core::{
        CellCoord, EnemyView, PlacementError, ProjectileView, ResourceSnapshot, TowerKind,
        TowerView, WorldPoint,
    };

    use super::World;

    /// Captures a snapshot of every enemy, ordered by identifier.
    #[must_use]
    pub fn enemies(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.snapshots())
    }

    /// Captures a snapshot of every tower, ordered by identifier.
    #[must_use]
    pub fn towers(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.snapshots())
    }

    /// Captures a snapshot of every projectile in flight, ordered by
    /// identifier.
    #[must_use]
    pub fn projectiles(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(world.projectiles.snapshots())
    }

    /// Captures the resource ledger.
    #[must_use]
    pub fn resources(world: &World) -> ResourceSnapshot {
        world.ledger.snapshot()
    }

    /// Accumulated simulation time.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Reports whether tick advancement is suspended by the pause toggle.
    #[must_use]
    pub fn paused(world: &World) -> bool {
        world.paused
    }

    /// Reports whether the base has fallen.
    #[must_use]
    pub fn game_over(world: &World) -> bool {
        world.game_over
    }

    /// Waypoints of the enemy path from spawn to base, at cell centers.
    #[must_use]
    pub fn waypoints(world: &World) -> Vec<WorldPoint> {
        world.grid.waypoints().to_vec()
    }

    /// Pre-validates a placement request, funds check included.
    pub fn can_place(world: &World, kind: TowerKind, cell: CellCoord) -> Result<(), PlacementError> {
        world.grid.can_place(cell)?;
        if !world.ledger.can_afford(kind.cost()) {
            return Err(PlacementError::InsufficientFunds);
        }
        Ok(())
    }
}
