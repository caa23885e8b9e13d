// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// --- Grid Coordinates ---

/// A `(row, col)` grid position, 0-indexed.
///
/// Serialized as a two-element array `[row, col]` to match the level JSON;
/// the string form `"row-col"` is the key format of `fixedCells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord(pub u32, pub u32);

impl Coord {
    pub fn row(&self) -> u32 {
        self.0
    }

    pub fn col(&self) -> u32 {
        self.1
    }

    /// Key form used by `fixedCells`, e.g. `"1-3"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.0, self.1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

impl FromStr for Coord {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once('-')
            .ok_or_else(|| format!("bad cell key: {s:?}"))?;
        let row = row.parse().map_err(|_| format!("bad cell key: {s:?}"))?;
        let col = col.parse().map_err(|_| format!("bad cell key: {s:?}"))?;
        Ok(Coord(row, col))
    }
}

// --- Operators and Fixed Symbols ---

/// Arithmetic operator of an equation. Serialized with the display signs
/// the level data uses (`×` and `÷`, not `*` and `/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Applies the operator under integer arithmetic.
    ///
    /// Returns `None` when no integer result exists: division by zero,
    /// division with a remainder, or overflow. Callers treat `None` as
    /// "equation does not hold", never as an error.
    pub fn apply(&self, op1: i64, op2: i64) -> Option<i64> {
        match self {
            Operator::Add => op1.checked_add(op2),
            Operator::Subtract => op1.checked_sub(op2),
            Operator::Multiply => op1.checked_mul(op2),
            Operator::Divide => {
                if op2 == 0 || op1 % op2 != 0 {
                    None
                } else {
                    op1.checked_div(op2)
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A non-numeric symbol appearing in `fixedCells`: an operator or `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellSymbol {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
    #[serde(rename = "=")]
    Equals,
}

impl CellSymbol {
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            CellSymbol::Add => Some(Operator::Add),
            CellSymbol::Subtract => Some(Operator::Subtract),
            CellSymbol::Multiply => Some(Operator::Multiply),
            CellSymbol::Divide => Some(Operator::Divide),
            CellSymbol::Equals => None,
        }
    }
}

/// Literal content of a fixed cell: a number, an operator sign, or `=`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixedValue {
    Number(i64),
    Symbol(CellSymbol),
}

impl FixedValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FixedValue::Number(n) => Some(*n),
            FixedValue::Symbol(_) => None,
        }
    }
}

// --- Level Data ---

/// Equation role: which of the three numeric slots a cell occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Op1,
    Op2,
    Result,
}

/// The level author's reference solution for one equation. Used to size
/// and sanity-check the draggable pool at load time; play-time checking
/// accepts any assignment that balances arithmetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub op1: i64,
    pub op2: i64,
    pub result: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationDetail {
    pub id: i64,
    pub op1_pos: Coord,
    pub op2_pos: Coord,
    pub res_pos: Coord,
    pub operator: Operator,
    pub operator_pos: Coord,
    pub equals_pos: Coord,
    pub solution: Solution,
}

impl EquationDetail {
    pub fn role_pos(&self, role: Role) -> Coord {
        match role {
            Role::Op1 => self.op1_pos,
            Role::Op2 => self.op2_pos,
            Role::Result => self.res_pos,
        }
    }

    /// The three numeric roles with their grid positions, in role order.
    pub fn roles(&self) -> [(Role, Coord); 3] {
        [
            (Role::Op1, self.op1_pos),
            (Role::Op2, self.op2_pos),
            (Role::Result, self.res_pos),
        ]
    }

    /// Canonical value for a role, from the author's reference solution.
    pub fn solution_value(&self, role: Role) -> i64 {
        match role {
            Role::Op1 => self.solution.op1,
            Role::Op2 => self.solution.op2,
            Role::Result => self.solution.result,
        }
    }
}

/// Immutable description of one level as served by `GET /api/levels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: i64,
    pub rows: u32,
    pub cols: u32,
    /// Literal cell contents keyed by `"row-col"`.
    pub fixed_cells: HashMap<String, FixedValue>,
    pub equations: Vec<EquationDetail>,
    /// Multiset of numbers available to drag into this level's blanks.
    pub draggable_numbers: Vec<i64>,
    pub name: String,
}

impl Level {
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row() < self.rows && coord.col() < self.cols
    }

    pub fn fixed_value(&self, coord: Coord) -> Option<FixedValue> {
        self.fixed_cells.get(&coord.key()).copied()
    }

    /// True when an equation role position has no fixed content, i.e. the
    /// player must fill it.
    pub fn is_blank(&self, coord: Coord) -> bool {
        self.fixed_value(coord).is_none()
    }
}

// --- Play-Time Projections ---

/// Cell classification for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Fixed,
    Blank,
    Operator,
    Equals,
    Empty,
}

/// Back-reference from a cell to the equation role it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationMember {
    pub equation_id: i64,
    pub role: Role,
}

/// Read-only per-cell projection the renderer draws from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellState {
    pub row: u32,
    pub col: u32,
    pub kind: CellKind,
    /// Current content: the fixed value, or the placed number for a filled
    /// blank. `None` for empty blanks and cells outside any equation.
    pub value: Option<FixedValue>,
    pub is_filled: bool,
    /// Styling hint: the owning equation currently balances.
    pub is_correct: bool,
    pub member: Option<EquationMember>,
}

/// One unit of the draggable pool. Ids are `num-{value}-{index}` with the
/// index taken from the level's `draggableNumbers` order, so duplicates
/// stay addressable individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraggableNumber {
    pub id: String,
    pub value: i64,
    pub is_used: bool,
}

// --- Progress Wire Types ---

/// Server-held progress record, `GET /api/progress/{userId}`.
/// A missing field defaults to 0 (unknown user).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub last_completed_level: usize,
}

/// Body of `POST /api/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub user_id: String,
    pub last_completed_level: usize,
}
