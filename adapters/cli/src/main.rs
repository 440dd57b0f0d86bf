#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless driver: wires the world and the pure systems into a tick loop.
//!
//! The driver starts waves as soon as the scheduler is idle, spends gold on
//! towers near the path with a simple greedy policy, and stops after the
//! requested number of waves or when the base falls. It exists to exercise
//! the simulation end to end and to print a run summary.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use endless_siege_core::{CellCoord, Command, Event, TowerKind, WorldPoint};
use endless_siege_system_combat::CombatResolver;
use endless_siege_system_waves::WaveScheduler;
use endless_siege_world::{apply, query, World, WorldConfig};

/// Towers are only worth building within this distance of the path.
const USEFUL_PLACEMENT_DISTANCE: f32 = 90.0;

/// Runs the Endless Siege simulation without a renderer.
#[derive(Debug, Parser)]
#[command(name = "endless-siege", about = "Headless Endless Siege simulation")]
struct Args {
    /// Session seed controlling wave composition order.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of waves to fight before reporting.
    #[arg(long, default_value_t = 5)]
    waves: u32,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Safety cap on total ticks.
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = WorldConfig::default();
    let mut world = World::new(config);
    let mut scheduler = WaveScheduler::new(args.seed);
    let mut resolver = CombatResolver::new();
    let mut policy = BuildPolicy::new(&world, config);

    let dt = Duration::from_millis(args.tick_ms);
    let mut events = Vec::new();
    let mut commands = Vec::new();
    let mut waves_done = 0u32;

    for _ in 0..args.max_ticks {
        events.clear();

        if !scheduler.status().active && waves_done < args.waves {
            match scheduler.start_wave() {
                Ok(wave) => log::info!("wave {} started", wave.get()),
                Err(error) => log::warn!("wave start refused: {error}"),
            }
        }

        policy.build(&mut world, &mut events);
        apply(&mut world, Command::Tick { dt }, &mut events);

        commands.clear();
        scheduler.handle(&events, &query::enemies(&world), &mut commands);
        resolver.handle(
            &query::towers(&world),
            &query::enemies(&world),
            &mut commands,
        );
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }

        for event in &events {
            match event {
                Event::TowerPlaced { kind, cell, .. } => {
                    log::debug!(
                        "built {kind:?} tower at ({}, {})",
                        cell.column(),
                        cell.row()
                    );
                }
                Event::EnemyKilled { enemy, reward, .. } => {
                    log::debug!("enemy {} down, +{} gold", enemy.get(), reward.get());
                }
                Event::EnemyReachedEnd {
                    lives_remaining, ..
                } => {
                    log::info!("breach, {lives_remaining} lives left");
                }
                Event::WaveCompleted { wave, bonus } => {
                    waves_done += 1;
                    log::info!("wave {} cleared, +{} gold", wave.get(), bonus.get());
                }
                _ => {}
            }
        }

        if query::game_over(&world) || waves_done >= args.waves {
            break;
        }
    }

    let resources = query::resources(&world);
    let outcome = if query::game_over(&world) {
        "defeat"
    } else {
        "survived"
    };
    log::info!(
        "{outcome}: score {} | gold {} | lives {} | kills {} | waves {} | {:?} simulated",
        resources.score,
        resources.gold.get(),
        resources.lives,
        resources.enemies_killed,
        resources.waves_completed,
        query::clock(&world),
    );
    Ok(())
}

/// Greedy construction policy: fill the buildable cells closest to the path
/// first, cycling through tower archetypes.
struct BuildPolicy {
    sites: Vec<CellCoord>,
    rotation: [TowerKind; 4],
    cursor: usize,
}

impl BuildPolicy {
    fn new(world: &World, config: WorldConfig) -> Self {
        Self {
            sites: placement_sites(world, config),
            rotation: [
                TowerKind::Basic,
                TowerKind::Basic,
                TowerKind::Frost,
                TowerKind::Cannon,
            ],
            cursor: 0,
        }
    }

    /// Places towers on the best remaining sites while gold lasts.
    fn build(&mut self, world: &mut World, out_events: &mut Vec<Event>) {
        while let Some(&cell) = self.sites.first() {
            let kind = self.rotation[self.cursor % self.rotation.len()];
            if query::resources(world).gold < kind.cost() {
                break;
            }
            apply(world, Command::PlaceTower { kind, cell }, out_events);
            let _ = self.sites.remove(0);
            if matches!(out_events.last(), Some(Event::TowerPlaced { .. })) {
                self.cursor += 1;
            }
        }
    }
}

/// Buildable cells within tower reach of the path, nearest first.
fn placement_sites(world: &World, config: WorldConfig) -> Vec<CellCoord> {
    let waypoints = query::waypoints(world);
    let columns = (config.width / config.cell_size) as u32;
    let rows = (config.height / config.cell_size) as u32;

    let mut sites: Vec<(CellCoord, f32)> = Vec::new();
    for column in 0..columns {
        for row in 0..rows {
            let cell = CellCoord::new(column, row);
            if query::can_place(world, TowerKind::Basic, cell).is_err() {
                continue;
            }
            let center = WorldPoint::new(
                column as f32 * config.cell_size + config.cell_size / 2.0,
                row as f32 * config.cell_size + config.cell_size / 2.0,
            );
            let distance = distance_to_path(center, &waypoints);
            if distance <= USEFUL_PLACEMENT_DISTANCE {
                sites.push((cell, distance));
            }
        }
    }

    sites.sort_by(|left, right| {
        left.1
            .partial_cmp(&right.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| left.0.cmp(&right.0))
    });
    sites.into_iter().map(|(cell, _)| cell).collect()
}

/// Distance from a point to the path polyline.
fn distance_to_path(point: WorldPoint, waypoints: &[WorldPoint]) -> f32 {
    let mut best = f32::INFINITY;
    for pair in waypoints.windows(2) {
        best = best.min(distance_to_segment(point, pair[0], pair[1]));
    }
    best
}

fn distance_to_segment(point: WorldPoint, start: WorldPoint, end: WorldPoint) -> f32 {
    let segment = (end.x() - start.x(), end.y() - start.y());
    let length_squared = segment.0 * segment.0 + segment.1 * segment.1;
    if length_squared <= f32::EPSILON {
        return point.distance_to(start);
    }
    let offset = (point.x() - start.x(), point.y() - start.y());
    let t = ((offset.0 * segment.0 + offset.1 * segment.1) / length_squared).clamp(0.0, 1.0);
    let projection = WorldPoint::new(start.x() + segment.0 * t, start.y() + segment.1 * t);
    point.distance_to(projection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_sites_hug_the_path() {
        let config = WorldConfig::default();
        let world = World::new(config);
        let sites = placement_sites(&world, config);
        assert!(!sites.is_empty());

        let waypoints = query::waypoints(&world);
        for cell in &sites {
            let center = WorldPoint::new(
                cell.column() as f32 * config.cell_size + config.cell_size / 2.0,
                cell.row() as f32 * config.cell_size + config.cell_size / 2.0,
            );
            assert!(distance_to_path(center, &waypoints) <= USEFUL_PLACEMENT_DISTANCE);
            assert!(query::can_place(&world, TowerKind::Basic, *cell).is_ok());
        }
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let start = WorldPoint::new(0.0, 0.0);
        let end = WorldPoint::new(10.0, 0.0);
        let beyond = WorldPoint::new(14.0, 3.0);
        assert!((distance_to_segment(beyond, start, end) - 5.0).abs() < 1e-4);

        let above = WorldPoint::new(5.0, 7.0);
        assert!((distance_to_segment(above, start, end) - 7.0).abs() < 1e-4);
    }
}
