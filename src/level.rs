// src/level.rs

use crate::error::GameError;
use crate::models::{Coord, EquationMember, Level};
use std::collections::{HashMap, HashSet};

/// Maps every blank target cell of a level to the single equation role it
/// fills. Fails if two equation roles claim the same blank cell, which
/// would make placement ambiguous.
pub fn blank_roles(level: &Level) -> Result<HashMap<Coord, EquationMember>, GameError> {
    let mut blanks: HashMap<Coord, EquationMember> = HashMap::new();
    for eq in &level.equations {
        for (role, pos) in eq.roles() {
            if !level.is_blank(pos) {
                continue;
            }
            let member = EquationMember {
                equation_id: eq.id,
                role,
            };
            if let Some(prior) = blanks.insert(pos, member) {
                return Err(GameError::MalformedLevel(format!(
                    "level {}: blank {} claimed by equation {} and equation {}",
                    level.id, pos, prior.equation_id, eq.id
                )));
            }
        }
    }
    Ok(blanks)
}

/// Structural validation of one catalog entry, run once at load time.
///
/// Checks dimensions, cell-key syntax, grid bounds for every referenced
/// position, blank/role uniqueness, pool sizing, and that the canonical
/// solution both balances and is coverable by the pool. Play-time code
/// assumes a validated level and re-derives none of this.
pub fn validate(level: &Level) -> Result<(), GameError> {
    let malformed = |detail: String| GameError::MalformedLevel(format!("level {}: {detail}", level.id));

    if level.rows == 0 || level.cols == 0 {
        return Err(malformed(format!(
            "grid dimensions {}x{} are not positive",
            level.rows, level.cols
        )));
    }

    for key in level.fixed_cells.keys() {
        let coord: Coord = key.parse().map_err(malformed)?;
        if !level.in_bounds(coord) {
            return Err(malformed(format!("fixed cell {coord} outside {}x{} grid", level.rows, level.cols)));
        }
    }

    let mut seen_ids = HashSet::new();
    for eq in &level.equations {
        if !seen_ids.insert(eq.id) {
            return Err(malformed(format!("duplicate equation id {}", eq.id)));
        }
        for pos in [eq.op1_pos, eq.op2_pos, eq.res_pos, eq.operator_pos, eq.equals_pos] {
            if !level.in_bounds(pos) {
                return Err(malformed(format!(
                    "equation {} references {pos} outside {}x{} grid",
                    eq.id, level.rows, level.cols
                )));
            }
        }
        if eq.operator.apply(eq.solution.op1, eq.solution.op2) != Some(eq.solution.result) {
            return Err(malformed(format!(
                "equation {} canonical solution {} {} {} does not equal {}",
                eq.id, eq.solution.op1, eq.operator, eq.solution.op2, eq.solution.result
            )));
        }
    }

    let blanks = blank_roles(level)?;
    if blanks.len() != level.draggable_numbers.len() {
        return Err(malformed(format!(
            "pool has {} numbers for {} blank cells",
            level.draggable_numbers.len(),
            blanks.len()
        )));
    }

    // The canonical solution must be reachable with the supplied pool:
    // count the values the blanks need and make sure the pool covers that
    // multiset. Other solutions may exist; this guards authoring typos.
    let mut needed: HashMap<i64, usize> = HashMap::new();
    for eq in &level.equations {
        for (role, pos) in eq.roles() {
            if blanks.contains_key(&pos) {
                *needed.entry(eq.solution_value(role)).or_insert(0) += 1;
            }
        }
    }
    let mut available: HashMap<i64, usize> = HashMap::new();
    for &n in &level.draggable_numbers {
        *available.entry(n).or_insert(0) += 1;
    }
    for (value, count) in &needed {
        if available.get(value).copied().unwrap_or(0) < *count {
            return Err(malformed(format!(
                "pool cannot cover canonical solution: needs {count} of {value}"
            )));
        }
    }

    Ok(())
}
