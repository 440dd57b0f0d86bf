#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Endless Siege simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based wave counter within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveId(u32);

impl WaveId {
    /// Creates a new wave identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier of the wave immediately following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Quantity of gold tracked by the resource ledger.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Gold(u32);

impl Gold {
    /// Creates a new gold amount with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying gold amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds two gold amounts, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Gold) -> Gold {
        Gold(self.0.saturating_add(other.0))
    }

    /// Subtracts a gold amount, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Gold) -> Gold {
        Gold(self.0.saturating_sub(other.0))
    }
}

/// Hit points carried by an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying hit-point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Applies damage, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, damage: u32) -> Health {
        Health(self.0.saturating_sub(damage))
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Continuous position within the playfield measured in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Enemy archetypes that can appear in waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline enemy with average health and speed.
    Basic,
    /// Low-health enemy that moves twice as fast as the baseline.
    Fast,
    /// Slow, heavily protected enemy worth a larger reward.
    Armored,
    /// Rare high-health enemy introduced in later waves.
    Boss,
}

impl EnemyKind {
    /// Returns the fixed stat bundle associated with the archetype.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Basic => EnemyStats {
                max_health: Health::new(50),
                speed: 1.0,
                reward: Gold::new(10),
                kill_bonus: Gold::new(0),
                radius: 12.0,
            },
            Self::Fast => EnemyStats {
                max_health: Health::new(30),
                speed: 2.0,
                reward: Gold::new(15),
                kill_bonus: Gold::new(5),
                radius: 12.0,
            },
            Self::Armored => EnemyStats {
                max_health: Health::new(120),
                speed: 0.5,
                reward: Gold::new(25),
                kill_bonus: Gold::new(10),
                radius: 12.0,
            },
            Self::Boss => EnemyStats {
                max_health: Health::new(300),
                speed: 0.7,
                reward: Gold::new(50),
                kill_bonus: Gold::new(25),
                radius: 20.0,
            },
        }
    }
}

/// Immutable stat bundle fixed by an enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Hit points the enemy spawns with.
    pub max_health: Health,
    /// Distance covered per tick at full speed, in world units.
    pub speed: f32,
    /// Gold credited when the enemy is killed.
    pub reward: Gold,
    /// Extra gold credited on top of the reward for tougher archetypes.
    pub kill_bonus: Gold,
    /// Collision radius in world units.
    pub radius: f32,
}

/// Slow-effect parameters carried by frost payloads.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlowParams {
    /// Speed multiplier applied while the effect is active, in (0, 1].
    pub multiplier: f32,
    /// Number of ticks the effect lasts from application.
    pub duration_ticks: u32,
}

/// Tower archetypes available for placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Single-target tower with balanced damage and rate of fire.
    Basic,
    /// Tower whose projectiles slow the enemies they damage.
    Frost,
    /// Tower whose projectiles explode, damaging every enemy in a radius.
    Cannon,
}

impl TowerKind {
    /// Gold cost of constructing the tower.
    #[must_use]
    pub const fn cost(self) -> Gold {
        match self {
            Self::Basic => Gold::new(25),
            Self::Frost => Gold::new(40),
            Self::Cannon => Gold::new(60),
        }
    }

    /// Travel speed of the tower's projectiles in world units per tick.
    #[must_use]
    pub const fn projectile_speed(self) -> f32 {
        match self {
            Self::Basic => 5.0,
            Self::Frost => 4.0,
            Self::Cannon => 3.0,
        }
    }

    /// Projectile archetype fired by the tower.
    #[must_use]
    pub const fn projectile_kind(self) -> ProjectileKind {
        match self {
            Self::Basic => ProjectileKind::Bullet,
            Self::Frost => ProjectileKind::Ice,
            Self::Cannon => ProjectileKind::Shell,
        }
    }

    /// Damage dealt per projectile at the provided level.
    #[must_use]
    pub const fn damage(self, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        match self {
            Self::Basic => 20 + steps * 10,
            Self::Frost => 10 + steps * 5,
            Self::Cannon => 15 + steps * 8,
        }
    }

    /// Targeting range in world units at the provided level.
    #[must_use]
    pub fn range(self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        match self {
            Self::Basic => 100.0 + steps * 10.0,
            Self::Frost => 80.0 + steps * 8.0,
            Self::Cannon => 90.0 + steps * 5.0,
        }
    }

    /// Minimum simulation-time interval between shots at the provided level.
    ///
    /// Only basic towers speed up with upgrades; their interval shrinks by
    /// 100ms per level down to a 300ms floor.
    #[must_use]
    pub fn fire_interval(self, level: u32) -> Duration {
        let steps = u64::from(level.saturating_sub(1));
        match self {
            Self::Basic => Duration::from_millis(1_000u64.saturating_sub(steps * 100).max(300)),
            Self::Frost => Duration::from_millis(800),
            Self::Cannon => Duration::from_millis(1_500),
        }
    }

    /// Explosion radius for area-of-effect payloads at the provided level.
    #[must_use]
    pub fn blast_radius(self, level: u32) -> Option<f32> {
        match self {
            Self::Cannon => {
                let steps = level.saturating_sub(1) as f32;
                Some(40.0 + steps * 5.0)
            }
            _ => None,
        }
    }

    /// Slow-effect parameters for frost payloads at the provided level.
    #[must_use]
    pub fn slow_params(self, level: u32) -> Option<SlowParams> {
        match self {
            Self::Frost => {
                let steps = level.saturating_sub(1);
                Some(SlowParams {
                    multiplier: (0.5 - steps as f32 * 0.1).max(0.2),
                    duration_ticks: 120 + steps * 30,
                })
            }
            _ => None,
        }
    }

    /// Gold cost of upgrading from the provided level to the next.
    ///
    /// Costs grow iteratively: each purchased upgrade multiplies the next
    /// cost by 1.5, floored to whole gold.
    #[must_use]
    pub fn upgrade_cost(self, level: u32) -> Gold {
        let base = match self {
            Self::Basic => 15u32,
            Self::Frost => 25,
            Self::Cannon => 35,
        };

        let mut cost = base;
        let mut step = 1;
        while step < level {
            cost = cost.saturating_mul(3) / 2;
            step += 1;
        }
        Gold::new(cost)
    }

    /// Gold refunded when the tower is sold: 70% of the base cost, floored.
    #[must_use]
    pub const fn sell_refund(self) -> Gold {
        Gold::new(self.cost().get() * 7 / 10)
    }
}

/// Projectile archetypes distinguished for collision and presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Direct-hit round fired by basic towers.
    Bullet,
    /// Slow-applying shard fired by frost towers.
    Ice,
    /// Explosive shell fired by cannon towers.
    Shell,
}

impl ProjectileKind {
    /// Collision radius of the projectile in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Bullet => 3.0,
            Self::Ice => 4.0,
            Self::Shell => 5.0,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a tower on the provided grid cell.
    PlaceTower {
        /// Archetype of the tower to construct.
        kind: TowerKind,
        /// Cell the tower should occupy.
        cell: CellCoord,
    },
    /// Requests that an existing tower advance one level.
    UpgradeTower {
        /// Identifier of the tower targeted for upgrade.
        tower: TowerId,
    },
    /// Requests removal of an existing tower in exchange for a refund.
    SellTower {
        /// Identifier of the tower targeted for sale.
        tower: TowerId,
    },
    /// Suspends or resumes simulation advancement.
    TogglePause,
    /// Discards all entity state and rebuilds the initial world.
    Restart,
    /// Requests that a new enemy enter the playfield at the path spawn point.
    SpawnEnemy {
        /// Archetype of the enemy to spawn.
        kind: EnemyKind,
    },
    /// Requests that a tower fire at the provided enemy.
    FireProjectile {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Identifier of the enemy targeted at the instant of firing.
        target: EnemyId,
    },
    /// Credits the completion bonus for a finished wave to the ledger.
    CreditWaveBonus {
        /// Wave that transitioned to its completed state.
        wave: WaveId,
        /// Bonus gold attached to the wave.
        bonus: Gold,
    },
}

/// Events broadcast after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the playfield.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// Spawn position on the path.
        position: WorldPoint,
    },
    /// Reports that an enemy's health reached zero.
    EnemyKilled {
        /// Identifier of the killed enemy.
        enemy: EnemyId,
        /// Archetype of the killed enemy.
        kind: EnemyKind,
        /// Total gold credited for the kill, bonus included.
        reward: Gold,
    },
    /// Reports that an enemy reached the base at the end of the path.
    EnemyReachedEnd {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
        /// Lives remaining after the base took damage.
        lives_remaining: u32,
    },
    /// Confirms that a tower fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired.
        tower: TowerId,
        /// Enemy targeted at the instant of firing.
        target: EnemyId,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Archetype of the placed tower.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
    },
    /// Confirms that a tower advanced one level.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Level reached after the upgrade.
        level: u32,
    },
    /// Confirms that a tower was sold and removed.
    TowerSold {
        /// Identifier of the removed tower.
        tower: TowerId,
        /// Gold credited back to the ledger.
        refund: Gold,
    },
    /// Reports that a tower placement request was rejected.
    PlacementRejected {
        /// Archetype requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a tower upgrade request was rejected.
    UpgradeRejected {
        /// Identifier provided in the upgrade request.
        tower: TowerId,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Reports that a tower sale request was rejected.
    SellRejected {
        /// Identifier provided in the sale request.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SellError,
    },
    /// Announces that a wave began spawning enemies.
    WaveStarted {
        /// Identifier of the started wave.
        wave: WaveId,
    },
    /// Announces that a wave finished and its bonus was credited once.
    WaveCompleted {
        /// Identifier of the completed wave.
        wave: WaveId,
        /// Bonus gold credited for the completion.
        bonus: Gold,
    },
    /// Announces that the pause state flipped.
    PauseToggled {
        /// Pause state after the toggle.
        paused: bool,
    },
    /// Announces that the base fell and tick advancement stopped.
    GameOver {
        /// Final score at the moment the last life was lost.
        score: u64,
    },
    /// Announces that the world was rebuilt from its configuration.
    SimulationReset,
}

/// Reasons a tower placement request may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the configured grid.
    #[error("cell is outside the grid bounds")]
    OutOfBounds,
    /// The requested cell is part of the enemy path.
    #[error("cell is occupied by the enemy path")]
    OnPath,
    /// The requested cell already hosts a tower.
    #[error("cell is already occupied")]
    Occupied,
    /// The ledger holds less gold than the tower costs.
    #[error("not enough gold")]
    InsufficientFunds,
}

/// Reasons a tower upgrade request may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No tower with the provided identifier exists.
    #[error("no such tower")]
    MissingTower,
    /// The tower already sits at the configured maximum level.
    #[error("tower is at maximum level")]
    MaxLevel,
    /// The ledger holds less gold than the upgrade costs.
    #[error("not enough gold")]
    InsufficientFunds,
}

/// Reasons a tower sale request may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SellError {
    /// No tower with the provided identifier exists.
    #[error("no such tower")]
    MissingTower,
}

/// Reasons a wave start request may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartWaveError {
    /// A wave is already spawning or has live enemies remaining.
    #[error("a wave is already active")]
    WaveActive,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Current position in world units.
    pub position: WorldPoint,
    /// Remaining hit points.
    pub health: Health,
    /// Hit points the enemy spawned with.
    pub max_health: Health,
    /// Index of the waypoint the enemy most recently reached.
    pub path_index: usize,
    /// Indicates the enemy has not been killed.
    pub alive: bool,
    /// Indicates the enemy reached the base at the end of the path.
    pub reached_end: bool,
    /// Speed multiplier currently applied by slow effects, in (0, 1].
    pub slow_multiplier: f32,
    /// Ticks remaining before the slow effect expires.
    pub slow_remaining: u32,
}

impl EnemySnapshot {
    /// Remaining health as a fraction of the spawn health.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health.get() == 0 {
            return 0.0;
        }
        self.health.get() as f32 / self.max_health.get() as f32
    }

    /// Reports whether the enemy is still participating in the simulation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.alive && !self.reached_end
    }

    /// Reports whether a slow effect is currently applied.
    #[must_use]
    pub const fn is_slowed(&self) -> bool {
        self.slow_remaining > 0
    }
}

/// Read-only snapshot describing all enemies on the playfield.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Archetype of the tower.
    pub kind: TowerKind,
    /// Level the tower currently sits at, starting from 1.
    pub level: u32,
    /// Cell the tower occupies.
    pub cell: CellCoord,
    /// Center of the occupied cell in world units.
    pub position: WorldPoint,
    /// Effective targeting range at the current level.
    pub range: f32,
    /// Simulation time remaining before the tower may fire again.
    pub cooldown_remaining: Duration,
}

impl TowerSnapshot {
    /// Reports whether the tower accrued enough time to fire.
    #[must_use]
    pub const fn ready_to_fire(&self) -> bool {
        self.cooldown_remaining.is_zero()
    }
}

/// Read-only snapshot describing all towers on the playfield.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Archetype of the projectile.
    pub kind: ProjectileKind,
    /// Current position in world units.
    pub position: WorldPoint,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot of the resource ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Gold available for construction and upgrades.
    pub gold: Gold,
    /// Lives remaining before the session ends.
    pub lives: u32,
    /// Accumulated score.
    pub score: u64,
    /// Count of enemies killed this session.
    pub enemies_killed: u32,
    /// Count of waves completed this session.
    pub waves_completed: u32,
}

/// Read-only progress report for the wave scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveStatus {
    /// Most recently started wave; zero before the first wave.
    pub wave: WaveId,
    /// Indicates whether a wave is currently spawning or being fought.
    pub active: bool,
    /// Count of enemies already emitted this wave.
    pub spawned: u32,
    /// Total enemies scheduled for this wave.
    pub total: u32,
}

impl WaveStatus {
    /// Fraction of the wave's enemies already emitted.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.spawned as f32 / self.total as f32
    }
}
