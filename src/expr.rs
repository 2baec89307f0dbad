use crate::common::*;
use crate::parse::{self, ParseDiceError};
use std::fmt;
use std::str::FromStr;

/// A single `XdY+Z[bW]` roll: `multiplicand` dice with `die_type` faces each,
/// plus a flat `addend`. Any face not strictly greater than `brutal` is rerolled.
///
/// Two equal expressions are still rolled separately; an expression carries no
/// identity beyond its fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceExpression {
    pub multiplicand: NonZeroUInt,
    pub die_type: NonZeroUInt,
    pub addend: UInt,
    pub brutal: UInt,
}

impl DiceExpression {
    pub const fn new(
        multiplicand: NonZeroUInt,
        die_type: NonZeroUInt,
        addend: UInt,
        brutal: UInt,
    ) -> Self {
        Self {
            multiplicand,
            die_type,
            addend,
            brutal,
        }
    }

    /// `(multiplicand, die_type, addend, brutal)`
    pub const fn as_tuple(&self) -> (UInt, UInt, UInt, UInt) {
        (
            self.multiplicand.get(),
            self.die_type.get(),
            self.addend,
            self.brutal,
        )
    }

    /// Whether some face of the die can exceed the brutal threshold.
    pub const fn has_valid_threshold(&self) -> bool {
        self.brutal < self.die_type.get()
    }

    /// The smallest total this expression can produce, assuming a valid threshold.
    pub fn min_total(&self) -> Total {
        Total::from(self.multiplicand.get()) * (Total::from(self.brutal) + 1)
            + Total::from(self.addend)
    }

    /// The largest total this expression can produce.
    pub fn max_total(&self) -> Total {
        Total::from(self.multiplicand.get()) * Total::from(self.die_type.get())
            + Total::from(self.addend)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.multiplicand, self.die_type)?;
        if self.addend != 0 {
            write!(f, "+{}", self.addend)?;
        }
        if self.brutal != 0 {
            write!(f, "b{}", self.brutal)?;
        }
        Ok(())
    }
}

impl TryFrom<(UInt, UInt, UInt, UInt)> for DiceExpression {
    type Error = ParseDiceError;

    fn try_from(
        (multiplicand, die_type, addend, brutal): (UInt, UInt, UInt, UInt),
    ) -> Result<Self, Self::Error> {
        let multiplicand = NonZeroUInt::new(multiplicand).ok_or(ParseDiceError::ZeroDice)?;
        let die_type = NonZeroUInt::new(die_type).ok_or(ParseDiceError::ZeroDice)?;
        Ok(Self::new(multiplicand, die_type, addend, brutal))
    }
}

/// Strict parsing: the whole string must be exactly one expression.
///
/// Use [`crate::parse_single`] to accept trailing text after the notation.
impl FromStr for DiceExpression {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let occurrence = parse::occurrences(s)
            .next()
            .filter(|o| o.span.start == 0)
            .ok_or(ParseDiceError::NoDice)?;
        if occurrence.span.end != s.len() {
            return Err(ParseDiceError::TrailingInput {
                position: occurrence.span.end,
            });
        }
        Ok(occurrence.expr)
    }
}
