//! Tower registry keyed by identifier, with cooldown bookkeeping.

use std::collections::BTreeMap;
use std::time::Duration;

use endless_siege_core::{CellCoord, TowerId, TowerKind, TowerSnapshot, WorldPoint};

#[derive(Clone, Debug)]
pub(crate) struct Tower {
    id: TowerId,
    kind: TowerKind,
    level: u32,
    cell: CellCoord,
    position: WorldPoint,
    cooldown: Duration,
}

impl Tower {
    pub(crate) fn kind(&self) -> TowerKind {
        self.kind
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) fn position(&self) -> WorldPoint {
        self.position
    }

    pub(crate) fn ready_to_fire(&self) -> bool {
        self.cooldown.is_zero()
    }

    /// Arms the cooldown for the tower's effective fire interval.
    pub(crate) fn start_cooldown(&mut self) {
        self.cooldown = self.kind.fire_interval(self.level);
    }

    pub(crate) fn promote(&mut self) -> u32 {
        self.level += 1;
        self.level
    }

    fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            level: self.level,
            cell: self.cell,
            position: self.position,
            range: self.kind.range(self.level),
            cooldown_remaining: self.cooldown,
        }
    }
}

/// Owning collection of towers with monotonically allocated identifiers.
#[derive(Clone, Debug, Default)]
pub(crate) struct TowerRegistry {
    towers: BTreeMap<TowerId, Tower>,
    next_id: u32,
}

impl TowerRegistry {
    /// Registers a freshly placed level-1 tower, ready to fire immediately.
    pub(crate) fn insert(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
        position: WorldPoint,
    ) -> TowerId {
        let id = TowerId::new(self.next_id);
        self.next_id += 1;
        let _ = self.towers.insert(
            id,
            Tower {
                id,
                kind,
                level: 1,
                cell,
                position,
                cooldown: Duration::ZERO,
            },
        );
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&Tower> {
        self.towers.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.towers.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<Tower> {
        self.towers.remove(&id)
    }

    /// Drains the provided delta time from every tower's cooldown.
    pub(crate) fn advance_cooldowns(&mut self, dt: Duration) {
        for tower in self.towers.values_mut() {
            tower.cooldown = tower.cooldown.saturating_sub(dt);
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<TowerSnapshot> {
        self.towers.values().map(Tower::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_towers_fire_immediately() {
        let mut registry = TowerRegistry::default();
        let id = registry.insert(
            TowerKind::Basic,
            CellCoord::new(2, 3),
            WorldPoint::new(100.0, 140.0),
        );
        assert!(registry.get(id).expect("just inserted").ready_to_fire());
    }

    #[test]
    fn cooldown_blocks_firing_until_drained() {
        let mut registry = TowerRegistry::default();
        let id = registry.insert(
            TowerKind::Frost,
            CellCoord::new(0, 0),
            WorldPoint::new(20.0, 20.0),
        );

        registry
            .get_mut(id)
            .expect("just inserted")
            .start_cooldown();
        assert!(!registry.get(id).expect("present").ready_to_fire());

        registry.advance_cooldowns(Duration::from_millis(400));
        assert!(!registry.get(id).expect("present").ready_to_fire());

        registry.advance_cooldowns(Duration::from_millis(400));
        assert!(registry.get(id).expect("present").ready_to_fire());
    }

    #[test]
    fn promotion_raises_effective_stats() {
        let mut registry = TowerRegistry::default();
        let id = registry.insert(
            TowerKind::Basic,
            CellCoord::new(1, 1),
            WorldPoint::new(60.0, 60.0),
        );

        let before = registry.get(id).expect("present").snapshot();
        assert_eq!(registry.get_mut(id).expect("present").promote(), 2);
        let after = registry.get(id).expect("present").snapshot();

        assert!(after.range > before.range);
        assert_eq!(after.level, 2);
    }

    #[test]
    fn identifiers_stay_unique_after_removal() {
        let mut registry = TowerRegistry::default();
        let first = registry.insert(
            TowerKind::Cannon,
            CellCoord::new(4, 4),
            WorldPoint::new(180.0, 180.0),
        );
        assert!(registry.remove(first).is_some());
        assert!(registry.remove(first).is_none());

        let second = registry.insert(
            TowerKind::Cannon,
            CellCoord::new(4, 4),
            WorldPoint::new(180.0, 180.0),
        );
        assert!(second.get() > first.get());
    }
}
