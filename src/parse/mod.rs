mod error;
mod lexer;
mod matcher;

pub use error::ParseDiceError;
pub use matcher::{Occurrence, Occurrences};

use crate::expr::DiceExpression;

/// Scans `text` for every occurrence of dice notation, leftmost first.
pub fn occurrences(text: &str) -> Occurrences<'_> {
    Occurrences::new(text)
}

/// Reads the dice notation at the very start of `token`.
///
/// Anything after the notation is ignored. Returns `None` if `token` does not
/// begin with notation.
pub fn parse_single(token: &str) -> Option<DiceExpression> {
    occurrences(token)
        .next()
        .filter(|o| o.span.start == 0)
        .map(|o| o.expr)
}

/// Every expression in `text`, in order of appearance.
pub fn extract_all(text: &str) -> Vec<DiceExpression> {
    occurrences(text).map(|o| o.expr).collect()
}
