//! End-to-end scenarios exercising the world through commands and queries.

use std::time::Duration;

use endless_siege_core::{
    CellCoord, Command, EnemyId, EnemyKind, Event, Gold, PlacementError, TowerId, TowerKind,
    UpgradeError, WaveId,
};
use endless_siege_world::{apply, query, World, WorldConfig};

const DT: Duration = Duration::from_millis(100);

/// Free cell one row above the path spawn cell, 40 units from the spawn
/// point on the default grid.
const TOWER_CELL: CellCoord = CellCoord::new(0, 9);

fn tick(world: &mut World, events: &mut Vec<Event>) {
    apply(world, Command::Tick { dt: DT }, events);
}

fn place(world: &mut World, kind: TowerKind, cell: CellCoord, events: &mut Vec<Event>) -> TowerId {
    apply(world, Command::PlaceTower { kind, cell }, events);
    events
        .iter()
        .find_map(|event| match event {
            Event::TowerPlaced { tower, .. } => Some(*tower),
            _ => None,
        })
        .expect("placement succeeds")
}

fn spawn(world: &mut World, kind: EnemyKind, events: &mut Vec<Event>) -> EnemyId {
    apply(world, Command::SpawnEnemy { kind }, events);
    events
        .iter()
        .rev()
        .find_map(|event| match event {
            Event::EnemySpawned { enemy, .. } => Some(*enemy),
            _ => None,
        })
        .expect("spawn succeeds")
}

#[test]
fn three_hits_kill_a_basic_enemy_and_credit_the_reward_once() {
    let mut world = World::default();
    let mut events = Vec::new();

    let tower = place(&mut world, TowerKind::Basic, TOWER_CELL, &mut events);
    let enemy = spawn(&mut world, EnemyKind::Basic, &mut events);

    let mut kill_reward = None;
    for _ in 0..200 {
        events.clear();
        tick(&mut world, &mut events);

        if let Some(reward) = events.iter().find_map(|event| match event {
            Event::EnemyKilled {
                enemy: killed,
                reward,
                ..
            } if *killed == enemy => Some(*reward),
            _ => None,
        }) {
            kill_reward = Some(reward);
            break;
        }

        let ready = query::towers(&world)
            .iter()
            .next()
            .is_some_and(|snapshot| snapshot.ready_to_fire());
        let active = query::enemies(&world)
            .iter()
            .any(|snapshot| snapshot.id == enemy && snapshot.is_active());
        if ready && active {
            apply(
                &mut world,
                Command::FireProjectile {
                    tower,
                    target: enemy,
                },
                &mut events,
            );
        }
    }

    assert_eq!(kill_reward, Some(Gold::new(10)));

    let resources = query::resources(&world);
    assert_eq!(resources.gold, Gold::new(85));
    assert_eq!(resources.enemies_killed, 1);

    // The corpse stays visible for the tick it died on and is culled at the
    // start of the next tick.
    assert!(query::enemies(&world)
        .iter()
        .any(|snapshot| snapshot.id == enemy && !snapshot.alive));
    events.clear();
    tick(&mut world, &mut events);
    assert!(query::enemies(&world)
        .iter()
        .all(|snapshot| snapshot.id != enemy));
}

#[test]
fn placement_on_path_is_rejected_without_charging_gold() {
    let mut world = World::default();
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Basic,
            cell: CellCoord::new(0, 10),
        },
        &mut events,
    );

    assert!(events.iter().any(|event| matches!(
        event,
        Event::PlacementRejected {
            reason: PlacementError::OnPath,
            ..
        }
    )));
    assert_eq!(query::resources(&world).gold, Gold::new(100));
    assert_eq!(query::towers(&world).iter().count(), 0);
}

#[test]
fn placement_without_funds_is_rejected() {
    let mut world = World::default();
    let mut events = Vec::new();

    // Four basic towers exhaust the starting 100 gold.
    for column in 0..4 {
        let _ = place(
            &mut world,
            TowerKind::Basic,
            CellCoord::new(column, 0),
            &mut events,
        );
        events.clear();
    }

    apply(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Basic,
            cell: CellCoord::new(4, 0),
        },
        &mut events,
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::PlacementRejected {
            reason: PlacementError::InsufficientFunds,
            ..
        }
    )));
    assert_eq!(query::towers(&world).iter().count(), 4);
}

#[test]
fn fire_rate_gates_shots_until_the_interval_elapses() {
    let mut world = World::default();
    let mut events = Vec::new();

    let tower = place(&mut world, TowerKind::Basic, TOWER_CELL, &mut events);
    let enemy = spawn(&mut world, EnemyKind::Armored, &mut events);
    events.clear();

    let fire = Command::FireProjectile {
        tower,
        target: enemy,
    };

    apply(&mut world, fire, &mut events);
    apply(&mut world, fire, &mut events);
    let fired = |events: &Vec<Event>| {
        events
            .iter()
            .filter(|event| matches!(event, Event::ProjectileFired { .. }))
            .count()
    };
    assert_eq!(fired(&events), 1);

    // 900ms of the 1000ms interval is not enough.
    for _ in 0..9 {
        tick(&mut world, &mut events);
    }
    apply(&mut world, fire, &mut events);
    assert_eq!(fired(&events), 1);

    tick(&mut world, &mut events);
    apply(&mut world, fire, &mut events);
    assert_eq!(fired(&events), 2);
}

#[test]
fn blast_damages_every_enemy_within_the_radius_at_full_strength() {
    let mut world = World::default();
    let mut events = Vec::new();

    let tower = place(&mut world, TowerKind::Cannon, TOWER_CELL, &mut events);

    // Stagger three basic enemies 20 units apart along the first segment.
    let far = spawn(&mut world, EnemyKind::Basic, &mut events);
    for _ in 0..20 {
        tick(&mut world, &mut events);
    }
    let middle = spawn(&mut world, EnemyKind::Basic, &mut events);
    for _ in 0..20 {
        tick(&mut world, &mut events);
    }
    let near = spawn(&mut world, EnemyKind::Basic, &mut events);
    events.clear();

    // One shell at the rearmost enemy; the epicenter catches the other two
    // at 20 and 40 units, the blast boundary included.
    apply(
        &mut world,
        Command::FireProjectile {
            tower,
            target: near,
        },
        &mut events,
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileFired { .. })));

    for _ in 0..30 {
        tick(&mut world, &mut events);
        if query::projectiles(&world).iter().count() == 0 {
            break;
        }
    }

    let enemies = query::enemies(&world);
    for id in [near, middle, far] {
        let snapshot = enemies
            .iter()
            .find(|snapshot| snapshot.id == id)
            .expect("enemy survives the blast");
        assert_eq!(snapshot.health.get(), 35, "enemy {:?}", id);
        assert!(snapshot.alive);
    }
}

#[test]
fn frost_shots_slow_the_struck_enemy() {
    let mut world = World::default();
    let mut events = Vec::new();

    let tower = place(&mut world, TowerKind::Frost, TOWER_CELL, &mut events);
    let enemy = spawn(&mut world, EnemyKind::Basic, &mut events);
    events.clear();

    apply(
        &mut world,
        Command::FireProjectile {
            tower,
            target: enemy,
        },
        &mut events,
    );

    let mut slowed = false;
    for _ in 0..30 {
        tick(&mut world, &mut events);
        let snapshot = query::enemies(&world).into_vec();
        if let Some(snapshot) = snapshot.iter().find(|snapshot| snapshot.id == enemy) {
            if snapshot.is_slowed() {
                assert!((snapshot.slow_multiplier - 0.5).abs() < f32::EPSILON);
                slowed = true;
                break;
            }
        }
    }
    assert!(slowed, "ice shard applies its slow on impact");
}

#[test]
fn pause_freezes_the_clock_and_every_entity() {
    let mut world = World::default();
    let mut events = Vec::new();

    let enemy = spawn(&mut world, EnemyKind::Fast, &mut events);
    apply(&mut world, Command::TogglePause, &mut events);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PauseToggled { paused: true })));

    events.clear();
    for _ in 0..5 {
        tick(&mut world, &mut events);
    }
    assert!(events.is_empty());
    assert_eq!(query::clock(&world), Duration::ZERO);

    let position = query::enemies(&world)
        .iter()
        .find(|snapshot| snapshot.id == enemy)
        .expect("enemy present")
        .position;

    apply(&mut world, Command::TogglePause, &mut events);
    tick(&mut world, &mut events);
    assert_eq!(query::clock(&world), DT);
    let moved = query::enemies(&world)
        .iter()
        .find(|snapshot| snapshot.id == enemy)
        .expect("enemy present")
        .position;
    assert!(position.distance_to(moved) > 0.0);
}

#[test]
fn losing_the_last_life_ends_the_game_until_restart() {
    let mut world = World::new(WorldConfig {
        starting_lives: 1,
        ..WorldConfig::default()
    });
    let mut events = Vec::new();

    let _ = spawn(&mut world, EnemyKind::Fast, &mut events);

    let mut over = false;
    for _ in 0..2_000 {
        events.clear();
        tick(&mut world, &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::GameOver { .. }))
        {
            over = true;
            break;
        }
    }
    assert!(over, "enemy walks the full path and takes the last life");
    assert!(query::game_over(&world));

    events.clear();
    tick(&mut world, &mut events);
    assert!(events.is_empty(), "ticks are no-ops after defeat");

    apply(&mut world, Command::Restart, &mut events);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::SimulationReset)));
    assert!(!query::game_over(&world));
    assert_eq!(query::clock(&world), Duration::ZERO);
    assert_eq!(query::resources(&world).lives, 1);
    assert_eq!(query::enemies(&world).iter().count(), 0);
}

#[test]
fn upgrades_charge_growing_costs_and_honor_the_level_cap() {
    let mut world = World::default();
    let mut events = Vec::new();

    let tower = place(&mut world, TowerKind::Basic, TOWER_CELL, &mut events);
    assert_eq!(query::resources(&world).gold, Gold::new(75));

    events.clear();
    apply(&mut world, Command::UpgradeTower { tower }, &mut events);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::TowerUpgraded { level: 2, .. })));
    assert_eq!(query::resources(&world).gold, Gold::new(60));

    events.clear();
    apply(&mut world, Command::UpgradeTower { tower }, &mut events);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::TowerUpgraded { level: 3, .. })));
    assert_eq!(query::resources(&world).gold, Gold::new(38));

    let mut capped = World::new(WorldConfig {
        max_tower_level: Some(2),
        ..WorldConfig::default()
    });
    events.clear();
    let tower = place(&mut capped, TowerKind::Basic, TOWER_CELL, &mut events);
    apply(&mut capped, Command::UpgradeTower { tower }, &mut events);
    events.clear();
    apply(&mut capped, Command::UpgradeTower { tower }, &mut events);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::UpgradeRejected {
            reason: UpgradeError::MaxLevel,
            ..
        }
    )));
}

#[test]
fn selling_refunds_seventy_percent_and_frees_the_cell() {
    let mut world = World::default();
    let mut events = Vec::new();

    let tower = place(&mut world, TowerKind::Basic, TOWER_CELL, &mut events);
    events.clear();

    apply(&mut world, Command::SellTower { tower }, &mut events);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::TowerSold {
            refund,
            ..
        } if *refund == Gold::new(17)
    )));
    assert_eq!(query::resources(&world).gold, Gold::new(92));

    // The freed cell accepts a new tower, and the stale identifier no longer
    // resolves for firing.
    events.clear();
    let _ = place(&mut world, TowerKind::Basic, TOWER_CELL, &mut events);
    let enemy = spawn(&mut world, EnemyKind::Basic, &mut events);
    events.clear();
    apply(
        &mut world,
        Command::FireProjectile {
            tower,
            target: enemy,
        },
        &mut events,
    );
    assert!(events.is_empty());
}

#[test]
fn wave_bonus_credits_gold_and_score_once() {
    let mut world = World::default();
    let mut events = Vec::new();

    apply(
        &mut world,
        Command::CreditWaveBonus {
            wave: WaveId::new(3),
            bonus: Gold::new(15),
        },
        &mut events,
    );

    assert!(events.iter().any(|event| matches!(
        event,
        Event::WaveCompleted {
            wave,
            bonus,
        } if *wave == WaveId::new(3) && *bonus == Gold::new(21)
    )));

    let resources = query::resources(&world);
    assert_eq!(resources.gold, Gold::new(121));
    assert_eq!(resources.score, 105);
    assert_eq!(resources.waves_completed, 1);
}
