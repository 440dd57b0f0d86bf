#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure combat resolution: target selection and fire commands.
//!
//! The resolver consumes tower and enemy snapshots, picks a target for every
//! tower that is ready to fire, and emits [`Command::FireProjectile`] batches
//! for the world to execute. Targets are re-evaluated from scratch on every
//! call, so towers always track the most dangerous enemy in range rather
//! than locking onto whatever they shot at last.

use endless_siege_core::{Command, EnemyId, EnemySnapshot, EnemyView, TowerSnapshot, TowerView};

/// Stateless-by-snapshot combat resolver with reusable scratch buffers.
#[derive(Debug, Default)]
pub struct CombatResolver {
    tower_workspace: Vec<TowerSnapshot>,
    enemy_workspace: Vec<EnemySnapshot>,
}

impl CombatResolver {
    /// Creates a resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks targets for every ready tower and emits fire commands.
    ///
    /// Target priority: the enemy farthest along the path wins; ties break
    /// toward the smallest distance to the tower, then the smallest enemy
    /// identifier, keeping the choice deterministic.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        enemies: &EnemyView,
        out_commands: &mut Vec<Command>,
    ) {
        self.tower_workspace.clear();
        self.enemy_workspace.clear();
        self.tower_workspace
            .extend(towers.iter().filter(|tower| tower.ready_to_fire()));
        self.enemy_workspace
            .extend(enemies.iter().filter(|enemy| enemy.is_active()));

        if self.tower_workspace.is_empty() || self.enemy_workspace.is_empty() {
            return;
        }

        for tower in &self.tower_workspace {
            let mut best: Option<Candidate> = None;
            for enemy in &self.enemy_workspace {
                let distance = tower.position.distance_to(enemy.position);
                if distance > tower.range {
                    continue;
                }
                let candidate = Candidate {
                    enemy: enemy.id,
                    path_index: enemy.path_index,
                    distance,
                };
                let replace = match &best {
                    Some(current) => candidate.precedes(current),
                    None => true,
                };
                if replace {
                    best = Some(candidate);
                }
            }

            if let Some(candidate) = best {
                out_commands.push(Command::FireProjectile {
                    tower: tower.id,
                    target: candidate.enemy,
                });
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    enemy: EnemyId,
    path_index: usize,
    distance: f32,
}

impl Candidate {
    /// Strict ordering over candidates; the winner takes the shot.
    fn precedes(&self, other: &Candidate) -> bool {
        if self.path_index != other.path_index {
            return self.path_index > other.path_index;
        }
        if (self.distance - other.distance).abs() > f32::EPSILON {
            return self.distance < other.distance;
        }
        self.enemy < other.enemy
    }
}
