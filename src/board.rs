// src/board.rs

//! Mutable play state for one active level: which blanks hold which pool
//! units, and which equations currently balance. A board is rebuilt from
//! scratch whenever the active level changes; nothing here is persisted.

use crate::error::GameError;
use crate::level;
use crate::models::{
    CellKind, CellState, CellSymbol, Coord, DraggableNumber, EquationMember, FixedValue, Level,
};
use crate::validator;
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug)]
pub struct Board {
    level: Level,
    /// Blank target cells and the single equation role each one fills.
    blanks: HashMap<Coord, EquationMember>,
    /// All equation role positions (fixed ones included), for the renderer
    /// projection. First equation wins where a fixed number is shared.
    members: HashMap<Coord, EquationMember>,
    /// Filled blanks, each holding the index of the pool unit it consumed.
    filled: HashMap<Coord, usize>,
    pool: Vec<DraggableNumber>,
    /// Per-equation correctness flags, recomputed after every mutation.
    correct: HashMap<i64, bool>,
}

impl Board {
    /// Builds a fresh board for a level: all blanks empty, whole pool
    /// available. Catalog entries are validated at load time, but the
    /// blank/role map is rebuilt here and duplicate claims are still
    /// rejected, so a structurally broken level fails instead of playing.
    pub fn new(level: &Level) -> Result<Self, GameError> {
        let blanks = level::blank_roles(level)?;

        let mut members = HashMap::new();
        for eq in &level.equations {
            for (role, pos) in eq.roles() {
                members.entry(pos).or_insert(EquationMember {
                    equation_id: eq.id,
                    role,
                });
            }
        }

        let pool = level
            .draggable_numbers
            .iter()
            .enumerate()
            .map(|(index, &value)| DraggableNumber {
                id: format!("{}-{value}-{index}", crate::constants::POOL_ID_PREFIX),
                value,
                is_used: false,
            })
            .collect();

        let mut board = Board {
            level: level.clone(),
            blanks,
            members,
            filled: HashMap::new(),
            pool,
            correct: HashMap::new(),
        };
        for id in board.level.equations.iter().map(|eq| eq.id).collect::<Vec<_>>() {
            board.recompute(id);
        }
        Ok(board)
    }

    // --- Intents ---

    /// Places an available pool number into an empty blank, consuming the
    /// lowest-index unused unit of that value (deterministic with
    /// duplicate values in the pool).
    pub fn place(&mut self, coord: Coord, value: i64) -> Result<(), GameError> {
        self.check_placeable(coord)?;
        let unit = self
            .pool
            .iter()
            .position(|u| !u.is_used && u.value == value)
            .ok_or_else(|| {
                GameError::InvalidPlacement(format!("no available {value} in the pool"))
            })?;
        self.commit_placement(coord, unit);
        Ok(())
    }

    /// Renderer intent: place one specific pool unit by id.
    pub fn place_unit(&mut self, coord: Coord, unit_id: &str) -> Result<(), GameError> {
        self.check_placeable(coord)?;
        let unit = self
            .pool
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| GameError::InvalidPlacement(format!("unknown pool unit {unit_id:?}")))?;
        if self.pool[unit].is_used {
            return Err(GameError::InvalidPlacement(format!(
                "pool unit {unit_id:?} is already placed"
            )));
        }
        self.commit_placement(coord, unit);
        Ok(())
    }

    /// Empties a filled blank, returning its number to the pool.
    pub fn remove(&mut self, coord: Coord) -> Result<(), GameError> {
        let member = *self.blanks.get(&coord).ok_or_else(|| {
            GameError::InvalidRemoval(format!("cell {coord} is not a target cell"))
        })?;
        let unit = self
            .filled
            .remove(&coord)
            .ok_or_else(|| GameError::InvalidRemoval(format!("cell {coord} is empty")))?;
        self.pool[unit].is_used = false;
        info!("[Board] Removed {} from {coord}", self.pool[unit].value);
        self.recompute(member.equation_id);
        Ok(())
    }

    fn check_placeable(&self, coord: Coord) -> Result<(), GameError> {
        if !self.blanks.contains_key(&coord) {
            return Err(GameError::InvalidPlacement(format!(
                "cell {coord} is not a target cell"
            )));
        }
        if self.filled.contains_key(&coord) {
            return Err(GameError::InvalidPlacement(format!(
                "cell {coord} is already filled"
            )));
        }
        Ok(())
    }

    fn commit_placement(&mut self, coord: Coord, unit: usize) {
        self.pool[unit].is_used = true;
        self.filled.insert(coord, unit);
        info!(
            "[Board] Placed {} at {coord} (unit {})",
            self.pool[unit].value, self.pool[unit].id
        );
        // blanks membership was checked before committing
        if let Some(member) = self.blanks.get(&coord).copied() {
            self.recompute(member.equation_id);
        }
    }

    fn recompute(&mut self, equation_id: i64) {
        let holds = match self.level.equations.iter().find(|e| e.id == equation_id) {
            Some(eq) => validator::evaluate(eq, |c| self.value_at(c)),
            None => return,
        };
        debug!("[Board] Equation {equation_id} balances: {holds}");
        self.correct.insert(equation_id, holds);
    }

    // --- Reads ---

    /// Number currently occupying a cell: a fixed number or a placed one.
    pub fn value_at(&self, coord: Coord) -> Option<i64> {
        if let Some(fixed) = self.level.fixed_value(coord) {
            return fixed.as_number();
        }
        self.filled.get(&coord).map(|&unit| self.pool[unit].value)
    }

    pub fn equation_correct(&self, equation_id: i64) -> bool {
        self.correct.get(&equation_id).copied().unwrap_or(false)
    }

    /// True iff every equation in the level balances right now.
    pub fn is_solved(&self) -> bool {
        self.level
            .equations
            .iter()
            .all(|eq| self.equation_correct(eq.id))
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Pool projection for the renderer's number tray.
    pub fn available_numbers(&self) -> &[DraggableNumber] {
        &self.pool
    }

    /// Read-only projection of one cell.
    pub fn cell_state(&self, coord: Coord) -> CellState {
        let fixed = self.level.fixed_value(coord);
        let is_blank = self.blanks.contains_key(&coord);
        let kind = match fixed {
            Some(FixedValue::Number(_)) => CellKind::Fixed,
            Some(FixedValue::Symbol(CellSymbol::Equals)) => CellKind::Equals,
            Some(FixedValue::Symbol(_)) => CellKind::Operator,
            None if is_blank => CellKind::Blank,
            None => CellKind::Empty,
        };
        let is_filled = self.filled.contains_key(&coord);
        let value = match fixed {
            Some(v) => Some(v),
            None => self.value_at(coord).map(FixedValue::Number),
        };
        let member = self.members.get(&coord).copied();
        let is_correct = member
            .map(|m| self.equation_correct(m.equation_id))
            .unwrap_or(false);

        CellState {
            row: coord.row(),
            col: coord.col(),
            kind,
            value,
            is_filled,
            is_correct,
            member,
        }
    }

    /// Whole-grid projection, row-major.
    pub fn cells(&self) -> Vec<CellState> {
        let mut states = Vec::with_capacity((self.level.rows * self.level.cols) as usize);
        for row in 0..self.level.rows {
            for col in 0..self.level.cols {
                states.push(self.cell_state(Coord(row, col)));
            }
        }
        states
    }
}
