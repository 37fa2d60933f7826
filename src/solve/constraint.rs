//! Pure constraint predicates shared by both solvers

use crate::collections::square::{Coord, Square};
use crate::puzzle::{Cage, CageId, Operator, Value};

/// Checks that `value` does not already occur elsewhere in the row or
/// column of `coord`.
pub fn row_col_valid(cells: &Square<Value>, coord: Coord, value: Value) -> bool {
    let width = cells.width();
    for col in 0..width {
        if col != coord.col() && cells[Coord::new(coord.row(), col)] == value {
            return false;
        }
    }
    for row in 0..width {
        if row != coord.row() && cells[Coord::new(row, coord.col())] == value {
            return false;
        }
    }
    true
}

/// Decides whether a partially assigned cage can still lead to a
/// satisfying completion. `values` holds the cage's cells in cage
/// order, 0 for unassigned.
///
/// This is a conservative pruning filter: it must never reject an
/// assignment that could still be completed. Subtract and divide are
/// only checked once every cell is assigned, since a single assigned
/// operand constrains nothing.
pub fn cage_partial_valid(values: &[Value], target: Value, operator: Operator) -> bool {
    let filled: Vec<Value> = values.iter().copied().filter(|&v| v != 0).collect();
    if filled.is_empty() {
        return true;
    }
    match operator {
        Operator::Add => {
            let sum: Value = filled.iter().sum();
            // an exact sum with cells still unassigned cannot be
            // completed, since every remaining cell must be >= 1
            !(sum > target || (sum == target && filled.len() < values.len()))
        }
        Operator::Multiply => {
            let product: Value = filled.iter().product();
            !(product > target || (product == target && filled.len() < values.len()))
        }
        Operator::Subtract | Operator::Divide => {
            filled.len() < values.len() || cage_satisfied(&filled, target, operator)
        }
        Operator::Equal => filled[0] == target,
    }
}

/// Checks a fully assigned cage against its operator and target.
///
/// `values` must hold no zeros. Subtract and divide are defined only
/// for two-cell cages and are false for any other arity. Both are
/// invariant under operand order: subtract checks `|a - b|` and divide
/// accepts an exact quotient in either orientation.
pub fn cage_satisfied(values: &[Value], target: Value, operator: Operator) -> bool {
    match operator {
        Operator::Add => values.iter().sum::<Value>() == target,
        Operator::Multiply => values.iter().product::<Value>() == target,
        Operator::Subtract => values.len() == 2 && (values[0] - values[1]).abs() == target,
        Operator::Divide => {
            values.len() == 2 && (divides_to(values[0], values[1], target)
                || divides_to(values[1], values[0], target))
        }
        Operator::Equal => values.first().map_or(false, |&value| value == target),
    }
}

fn divides_to(a: Value, b: Value, target: Value) -> bool {
    b != 0 && a % b == 0 && a / b == target
}

/// A precomputed cell → cage lookup.
///
/// Built once per solve by iterating cages in declaration order and
/// only filling empty slots, so for overlapping cages the first
/// declared cage owns the cell. Cells in no cage map to `None`.
pub struct CageMap(Square<Option<CageId>>);

impl CageMap {
    pub fn new(width: usize, cages: &[Cage]) -> Self {
        let mut map: Square<Option<CageId>> = Square::with_width(width);
        for (id, cage) in cages.iter().enumerate() {
            for &cell in cage.cells() {
                let slot = &mut map[cell];
                if slot.is_none() {
                    *slot = Some(id);
                }
            }
        }
        Self(map)
    }

    pub fn cage_at(&self, coord: Coord) -> Option<CageId> {
        self.0[coord]
    }
}

/// The consistency oracle for placing `value` at `coord`.
///
/// Rejects if the placement violates row or column uniqueness, if the
/// owning cage can no longer be completed, or if the placement fills
/// the owning cage without satisfying it. A cell in no cage only gets
/// the row/column check.
pub fn check_placement(
    cells: &Square<Value>,
    cages: &[Cage],
    cage_map: &CageMap,
    coord: Coord,
    value: Value,
) -> bool {
    if !row_col_valid(cells, coord, value) {
        return false;
    }
    let cage = match cage_map.cage_at(coord) {
        Some(id) => &cages[id],
        None => return true,
    };
    let values: Vec<Value> = cage
        .cells()
        .iter()
        .map(|&cell| if cell == coord { value } else { cells[cell] })
        .collect();
    if !cage_partial_valid(&values, cage.target(), cage.operator()) {
        return false;
    }
    if values.iter().all(|&v| v != 0)
        && !cage_satisfied(&values, cage.target(), cage.operator())
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Grid;

    #[test]
    fn row_col_uniqueness() {
        let mut cells = Square::with_width_and_value(3, 0);
        cells[Coord::new(0, 0)] = 2;
        cells[Coord::new(2, 1)] = 3;
        assert!(!row_col_valid(&cells, Coord::new(0, 2), 2));
        assert!(!row_col_valid(&cells, Coord::new(0, 1), 3));
        assert!(row_col_valid(&cells, Coord::new(0, 1), 1));
        assert!(row_col_valid(&cells, Coord::new(1, 2), 3));
    }

    #[test]
    fn add_pruning() {
        assert!(cage_partial_valid(&[0, 0, 0], 6, Operator::Add));
        assert!(cage_partial_valid(&[1, 2, 0], 6, Operator::Add));
        assert!(!cage_partial_valid(&[4, 3, 0], 6, Operator::Add));
        // exact sum with a cell still open cannot be completed
        assert!(!cage_partial_valid(&[2, 4, 0], 6, Operator::Add));
        assert!(cage_partial_valid(&[1, 2, 3], 6, Operator::Add));
    }

    #[test]
    fn multiply_pruning() {
        assert!(cage_partial_valid(&[2, 3, 0], 12, Operator::Multiply));
        assert!(!cage_partial_valid(&[4, 4, 0], 12, Operator::Multiply));
        assert!(!cage_partial_valid(&[3, 4, 0], 12, Operator::Multiply));
        assert!(cage_partial_valid(&[2, 3, 2], 12, Operator::Multiply));
    }

    #[test]
    fn subtract_divide_deferred_until_full() {
        assert!(cage_partial_valid(&[5, 0], 2, Operator::Subtract));
        assert!(!cage_partial_valid(&[5, 1], 2, Operator::Subtract));
        assert!(cage_partial_valid(&[5, 3], 2, Operator::Subtract));
        assert!(cage_partial_valid(&[0, 4], 2, Operator::Divide));
        assert!(!cage_partial_valid(&[3, 4], 2, Operator::Divide));
        assert!(cage_partial_valid(&[2, 4], 2, Operator::Divide));
    }

    #[test]
    fn equal_cage() {
        assert!(cage_partial_valid(&[0], 4, Operator::Equal));
        assert!(cage_partial_valid(&[4], 4, Operator::Equal));
        assert!(!cage_partial_valid(&[3], 4, Operator::Equal));
        assert!(cage_satisfied(&[4], 4, Operator::Equal));
        assert!(!cage_satisfied(&[3], 4, Operator::Equal));
    }

    #[test]
    fn satisfied_exact_arithmetic() {
        assert!(cage_satisfied(&[1, 2, 3], 6, Operator::Add));
        assert!(!cage_satisfied(&[1, 2, 2], 6, Operator::Add));
        assert!(cage_satisfied(&[2, 3], 6, Operator::Multiply));
        assert!(!cage_satisfied(&[2, 2], 6, Operator::Multiply));
        // inexact quotients never satisfy
        assert!(!cage_satisfied(&[3, 2], 2, Operator::Divide));
        assert!(cage_satisfied(&[4, 2], 2, Operator::Divide));
    }

    #[test]
    fn subtract_divide_operand_order_invariant() {
        assert!(cage_satisfied(&[5, 3], 2, Operator::Subtract));
        assert!(cage_satisfied(&[3, 5], 2, Operator::Subtract));
        assert!(cage_satisfied(&[2, 6], 3, Operator::Divide));
        assert!(cage_satisfied(&[6, 2], 3, Operator::Divide));
    }

    #[test]
    fn subtract_divide_require_two_cells() {
        assert!(!cage_satisfied(&[5], 5, Operator::Subtract));
        assert!(!cage_satisfied(&[5, 3, 1], 1, Operator::Subtract));
        assert!(!cage_satisfied(&[4], 4, Operator::Divide));
        assert!(!cage_satisfied(&[4, 2, 1], 2, Operator::Divide));
    }

    #[test]
    fn placement_oracle() {
        let mut grid = Grid::new(2).unwrap();
        grid.add_cage(vec![Coord::new(0, 0), Coord::new(0, 1)], '+', 3)
            .unwrap();
        let cage_map = CageMap::new(grid.width(), grid.cages());
        let mut cells = grid.cells().clone();
        assert!(check_placement(
            &cells,
            grid.cages(),
            &cage_map,
            Coord::new(0, 0),
            1,
        ));
        cells[Coord::new(0, 0)] = 1;
        // fills the cage to 1 + 1 and repeats in the row
        assert!(!check_placement(
            &cells,
            grid.cages(),
            &cage_map,
            Coord::new(0, 1),
            1,
        ));
        assert!(check_placement(
            &cells,
            grid.cages(),
            &cage_map,
            Coord::new(0, 1),
            2,
        ));
        // uncaged cells only get the row/column check
        assert!(!check_placement(
            &cells,
            grid.cages(),
            &cage_map,
            Coord::new(1, 0),
            1,
        ));
        assert!(check_placement(
            &cells,
            grid.cages(),
            &cage_map,
            Coord::new(1, 0),
            2,
        ));
    }

    #[test]
    fn overlapping_cages_resolved_by_declaration_order() {
        let mut grid = Grid::new(2).unwrap();
        grid.add_cage(vec![Coord::new(0, 0)], '=', 1).unwrap();
        grid.add_cage(vec![Coord::new(0, 0), Coord::new(1, 0)], '+', 100)
            .unwrap();
        let cage_map = CageMap::new(grid.width(), grid.cages());
        assert_eq!(cage_map.cage_at(Coord::new(0, 0)), Some(0));
        assert_eq!(cage_map.cage_at(Coord::new(1, 0)), Some(1));
        assert_eq!(cage_map.cage_at(Coord::new(1, 1)), None);
        // (0, 0) is judged by the first declared cage only
        assert!(check_placement(
            grid.cells(),
            grid.cages(),
            &cage_map,
            Coord::new(0, 0),
            1,
        ));
        assert!(!check_placement(
            grid.cells(),
            grid.cages(),
            &cage_map,
            Coord::new(0, 0),
            2,
        ));
    }
}
