//! Placement grid and the fixed enemy path carved through it.

use std::collections::{BTreeMap, BTreeSet};

use endless_siege_core::{CellCoord, PlacementError, TowerId, WorldPoint};

/// Fractional turn points of the winding path, expressed as (row, column)
/// fractions of the grid dimensions. The first point sits on the left edge,
/// the last on the right edge.
const TURN_POINTS: [(f32, f32); 8] = [
    (0.7, 0.0),
    (0.7, 0.25),
    (0.3, 0.25),
    (0.3, 0.6),
    (0.8, 0.6),
    (0.8, 0.85),
    (0.4, 0.85),
    (0.4, 1.0),
];

/// Square-cell placement grid with the enemy path marked as unbuildable.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    cell_size: f32,
    width: f32,
    height: f32,
    path_cells: BTreeSet<CellCoord>,
    occupancy: BTreeMap<CellCoord, TowerId>,
    waypoints: Vec<WorldPoint>,
}

impl Grid {
    /// Builds the grid for a playfield of the provided dimensions and carves
    /// the fixed path through it.
    pub(crate) fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let columns = (width / cell_size).floor() as u32;
        let rows = (height / cell_size).floor() as u32;

        let turns: Vec<CellCoord> = TURN_POINTS
            .iter()
            .map(|&(row_fraction, column_fraction)| {
                let row = ((rows as f32 * row_fraction) as u32).min(rows.saturating_sub(1));
                let column = if (column_fraction - 1.0).abs() < f32::EPSILON {
                    columns.saturating_sub(1)
                } else {
                    ((columns as f32 * column_fraction) as u32).min(columns.saturating_sub(1))
                };
                CellCoord::new(column, row)
            })
            .collect();

        let mut path_cells = BTreeSet::new();
        for pair in turns.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let column_range = start.column().min(end.column())..=start.column().max(end.column());
            for column in column_range {
                let row_range = start.row().min(end.row())..=start.row().max(end.row());
                for row in row_range {
                    let _ = path_cells.insert(CellCoord::new(column, row));
                }
            }
        }

        let waypoints = turns
            .iter()
            .map(|cell| cell_center(*cell, cell_size))
            .collect();

        Self {
            columns,
            rows,
            cell_size,
            width,
            height,
            path_cells,
            occupancy: BTreeMap::new(),
            waypoints,
        }
    }

    pub(crate) fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    pub(crate) fn spawn_point(&self) -> WorldPoint {
        self.waypoints[0]
    }

    pub(crate) fn cell_center(&self, cell: CellCoord) -> WorldPoint {
        cell_center(cell, self.cell_size)
    }

    fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Checks every placement precondition for the provided cell.
    pub(crate) fn can_place(&self, cell: CellCoord) -> Result<(), PlacementError> {
        if !self.in_bounds(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.path_cells.contains(&cell) {
            return Err(PlacementError::OnPath);
        }
        if self.occupancy.contains_key(&cell) {
            return Err(PlacementError::Occupied);
        }
        Ok(())
    }

    /// Marks the cell as occupied by the provided tower. Fails atomically
    /// when any placement precondition is violated.
    pub(crate) fn place(&mut self, cell: CellCoord, tower: TowerId) -> Result<(), PlacementError> {
        self.can_place(cell)?;
        let _ = self.occupancy.insert(cell, tower);
        Ok(())
    }

    /// Clears the cell, yielding the identifier of the tower that held it.
    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<TowerId> {
        self.occupancy.remove(&cell)
    }

    /// Reports whether the point lies within the playfield extended by the
    /// provided margin on every side.
    pub(crate) fn contains_with_margin(&self, point: WorldPoint, margin: f32) -> bool {
        point.x() >= -margin
            && point.x() <= self.width + margin
            && point.y() >= -margin
            && point.y() <= self.height + margin
    }
}

fn cell_center(cell: CellCoord, cell_size: f32) -> WorldPoint {
    WorldPoint::new(
        cell.column() as f32 * cell_size + cell_size / 2.0,
        cell.row() as f32 * cell_size + cell_size / 2.0,
    )
}
