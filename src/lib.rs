//! Dice notation in free-form text.
//!
//! Recognizes `XdY+Z` rolls, with an optional brutal threshold `bW`, anywhere
//! in a string and replaces each one with a rolled total.
//!
//! ```
//! let expr = dmxm_dice::parse_single("d10+5b2 brutal damage").unwrap();
//! assert_eq!(expr.as_tuple(), (1, 10, 5, 2));
//!
//! let post = dmxm_dice::process("Damage: 2d6+3").unwrap();
//! let damage: u64 = post.trim_start_matches("Damage: ").parse().unwrap();
//! assert!((5..=15).contains(&damage));
//! ```

pub mod common;
mod expr;
pub mod parse;
mod process;
pub mod roll;

pub use common::Total;
pub use expr::DiceExpression;
pub use parse::{occurrences, Occurrence, Occurrences, ParseDiceError};
pub use roll::{
    DefaultRoller, Die, MarkdownStringifier, Roll, RollContext, RollError, Roller,
    SimpleStringifier, Stringify, DEFAULT_MAX_DICE,
};

use std::borrow::Cow;

/// Reads the dice notation at the very start of `token`; anything after it is
/// ignored. `None` means `token` is not a dice roll.
pub fn parse_single(token: &str) -> Option<DiceExpression> {
    parse::parse_single(token)
}

/// Every dice expression in `text`, leftmost first.
pub fn extract_all(text: &str) -> Vec<DiceExpression> {
    parse::extract_all(text)
}

/// Rolls `expr` with a freshly seeded generator and no dice budget.
///
/// # Errors
///
/// See [RollContext::roll].
pub fn evaluate(expr: &DiceExpression) -> Result<Total, RollError> {
    RollContext::default().evaluate(expr)
}

/// Replaces every dice expression in `text` with its rolled total, using a
/// freshly seeded generator and no dice budget.
///
/// # Errors
///
/// See [RollContext::process].
pub fn process(text: &str) -> Result<Cow<'_, str>, RollError> {
    RollContext::default().process(text)
}
