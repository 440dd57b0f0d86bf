//! Projectiles in flight: straight-line travel, expiry, and payloads.

use endless_siege_core::{ProjectileId, ProjectileKind, ProjectileSnapshot, SlowParams, WorldPoint};
use glam::Vec2;

/// Overshoot allowance past the launch-time target distance, and the margin
/// outside the playfield at which strays expire.
pub(crate) const OVERSHOOT_MARGIN: f32 = 50.0;

/// Effect delivered on impact, frozen from the firing tower's effective
/// stats at launch time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Payload {
    /// Damage to the first enemy struck.
    Direct,
    /// Damage plus a slow effect to the first enemy struck.
    Slow(SlowParams),
    /// Damage to every enemy within the radius of the impact point.
    Blast {
        /// Explosion radius in world units.
        radius: f32,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    kind: ProjectileKind,
    position: Vec2,
    velocity: Vec2,
    damage: u32,
    payload: Payload,
    travelled: f32,
    max_distance: f32,
    alive: bool,
}

impl Projectile {
    pub(crate) fn position(&self) -> WorldPoint {
        WorldPoint::new(self.position.x, self.position.y)
    }

    pub(crate) fn kind(&self) -> ProjectileKind {
        self.kind
    }

    pub(crate) fn damage(&self) -> u32 {
        self.damage
    }

    pub(crate) fn payload(&self) -> Payload {
        self.payload
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.alive
    }

    /// Moves the projectile one step, expiring it past its travel allowance.
    pub(crate) fn advance(&mut self) {
        if !self.alive {
            return;
        }
        self.position += self.velocity;
        self.travelled += self.velocity.length();
        if self.travelled > self.max_distance {
            self.alive = false;
        }
    }

    pub(crate) fn expire(&mut self) {
        self.alive = false;
    }

    fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position(),
        }
    }
}

/// Owning collection of projectiles with monotonically allocated identifiers.
#[derive(Clone, Debug, Default)]
pub(crate) struct ProjectileRegistry {
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl ProjectileRegistry {
    /// Launches a projectile from `origin` aimed at `target`, frozen with
    /// the provided damage and payload.
    pub(crate) fn launch(
        &mut self,
        kind: ProjectileKind,
        origin: WorldPoint,
        target: WorldPoint,
        speed: f32,
        damage: u32,
        payload: Payload,
    ) -> ProjectileId {
        let id = ProjectileId::new(self.next_id);
        self.next_id += 1;

        let origin = Vec2::new(origin.x(), origin.y());
        let target = Vec2::new(target.x(), target.y());
        let offset = target - origin;
        let distance = offset.length();
        let velocity = if distance > f32::EPSILON {
            offset / distance * speed
        } else {
            Vec2::new(speed, 0.0)
        };

        self.projectiles.push(Projectile {
            id,
            kind,
            position: origin,
            velocity,
            damage,
            payload,
            travelled: 0.0,
            max_distance: distance + OVERSHOOT_MARGIN,
            alive: true,
        });
        id
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    /// Drops every projectile that expired on a previous tick.
    pub(crate) fn cull(&mut self) {
        self.projectiles.retain(Projectile::is_alive);
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.projectiles.iter().map(Projectile::snapshot).collect()
    }
}
