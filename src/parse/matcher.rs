use super::lexer::{lexer, Lexer, TokenKind};
use crate::common::*;
use crate::expr::DiceExpression;
use logos_iter::LogosIter;
use std::ops::Range;

/// One appearance of dice notation in a text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Occurrence {
    pub expr: DiceExpression,
    /// Byte range of the notation within the scanned text.
    pub span: Range<usize>,
}

/// A run of digits. `value` is `None` when the run does not fit in a [UInt].
#[derive(Debug, Clone)]
struct Digits {
    span: Range<usize>,
    value: Option<UInt>,
}

/// Iterator over the non-overlapping occurrences of dice notation in a text,
/// leftmost first.
///
/// The multiplicand is the whole digit run directly before `d`. The addend and
/// brutal suffixes are each taken at most once, and brutal may only follow the
/// die type or the addend. A candidate whose numbers are zero where a positive
/// value is needed, or too large for a [UInt], is skipped without being
/// reported; its text does not take part in any other occurrence.
pub struct Occurrences<'a> {
    lexer: Lexer<'a>,
    /// The digit run just before the current token, if any.
    pending: Option<Digits>,
}

impl<'a> Occurrences<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self {
            lexer: lexer(s),
            pending: None,
        }
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.matches(kind) {
            self.lexer.next();
            true
        } else {
            false
        }
    }

    fn digits(&mut self) -> Digits {
        Digits {
            span: self.lexer.span(),
            value: self.lexer.slice().parse().ok(),
        }
    }

    fn consume_digits(&mut self) -> Option<Digits> {
        if self.consume(TokenKind::Integer) {
            Some(self.digits())
        } else {
            None
        }
    }

    /// Completes a candidate whose `d` has just been consumed.
    ///
    /// Returns `None` both when there is no die type and when the candidate
    /// holds an unusable number; scanning resumes after the consumed tokens
    /// either way.
    fn complete(&mut self, start: usize, multiplicand: Option<Digits>) -> Option<Occurrence> {
        let die_type = self.consume_digits()?;
        let mut end = die_type.span.end;

        let mut addend = None;
        let mut dangling_plus = false;
        if self.consume(TokenKind::Plus) {
            addend = self.consume_digits();
            dangling_plus = addend.is_none();
        }
        if let Some(addend) = &addend {
            end = addend.span.end;
        }

        let mut brutal = None;
        if !dangling_plus && self.consume(TokenKind::Brutal) {
            brutal = self.consume_digits();
        }
        if let Some(brutal) = &brutal {
            end = brutal.span.end;
        }

        let multiplicand = match multiplicand {
            Some(digits) => NonZeroUInt::new(digits.value?)?,
            None => NonZeroUInt::new(1)?,
        };
        let die_type = NonZeroUInt::new(die_type.value?)?;
        let addend = match addend {
            Some(digits) => digits.value?,
            None => 0,
        };
        let brutal = match brutal {
            Some(digits) => digits.value?,
            None => 0,
        };

        Some(Occurrence {
            expr: DiceExpression::new(multiplicand, die_type, addend, brutal),
            span: start..end,
        })
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(kind) = self.lexer.next() {
            match kind {
                TokenKind::Integer => self.pending = Some(self.digits()),
                TokenKind::Die => {
                    let multiplicand = self.pending.take();
                    let start = multiplicand
                        .as_ref()
                        .map_or(self.lexer.span().start, |digits| digits.span.start);
                    if let Some(occurrence) = self.complete(start, multiplicand) {
                        return Some(occurrence);
                    }
                }
                _ => self.pending = None,
            }
        }
        None
    }
}
