use super::stringify::{SimpleStringifier, Stringify};
use crate::common::*;
use crate::expr::DiceExpression;
use std::fmt;

/// The outcome of rolling one [DiceExpression].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Roll {
    pub expr: DiceExpression,
    pub dice: Vec<Die>,
}

impl Roll {
    pub fn new(expr: DiceExpression, dice: Vec<Die>) -> Self {
        Self { expr, dice }
    }

    /// Sum of the kept faces plus the addend.
    pub fn total(&self) -> Total {
        let faces: Total = self.dice.iter().map(|die| Total::from(die.value())).sum();
        faces + Total::from(self.expr.addend)
    }

    pub fn rerolls(&self) -> usize {
        self.dice.iter().map(Die::rerolls).sum()
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier.str_roll(self))
    }
}

/// A single die and every face it showed. Only the last face is kept; the
/// earlier ones were rerolled.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Die {
    pub sides: NonZeroUInt,
    pub faces: NonEmpty<UInt>,
}

impl Die {
    pub fn new(sides: NonZeroUInt, face: UInt) -> Self {
        Self {
            sides,
            faces: vec1![face],
        }
    }

    /// A die that showed each of `rerolled` in turn before settling on `face`.
    pub fn with_rerolls(sides: NonZeroUInt, rerolled: Vec<UInt>, face: UInt) -> Self {
        Self {
            sides,
            faces: NonEmpty::from_vec_push(rerolled, face),
        }
    }

    pub fn value(&self) -> UInt {
        *self.faces.last()
    }

    pub fn rerolls(&self) -> usize {
        self.faces.len() - 1
    }
}
