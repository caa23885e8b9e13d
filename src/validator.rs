// src/validator.rs

//! Pure equation checking. The board feeds this the current cell values;
//! nothing here mutates or consults the canonical solution.

use crate::models::{Coord, EquationDetail};

/// Whether one equation currently balances.
///
/// `value_at` resolves a grid position to the number occupying it (a fixed
/// number or a placed one); `None` means the blank is still empty and the
/// equation cannot hold yet. Division only balances when exact; `7 ÷ 2`
/// simply evaluates to false.
pub fn evaluate<F>(eq: &EquationDetail, value_at: F) -> bool
where
    F: Fn(Coord) -> Option<i64>,
{
    let (op1, op2, result) = match (
        value_at(eq.op1_pos),
        value_at(eq.op2_pos),
        value_at(eq.res_pos),
    ) {
        (Some(a), Some(b), Some(r)) => (a, b, r),
        _ => return false,
    };

    eq.operator.apply(op1, op2) == Some(result)
}
