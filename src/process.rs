use crate::common::Total;
use crate::expr::DiceExpression;
use crate::parse::{occurrences, Occurrence};
use crate::roll::{Roll, RollContext, RollError, Roller};
use std::borrow::Cow;
use tracing::debug;

impl<R: Roller> RollContext<R> {
    /// Replaces every occurrence of dice notation in `text` with a freshly
    /// rolled total.
    ///
    /// Occurrences are rolled one at a time, left to right, so identical
    /// notation appearing twice gets two independent results. Text without
    /// notation is returned borrowed.
    ///
    /// # Errors
    ///
    /// The first [RollError] raised by any occurrence. No partial text is
    /// returned.
    pub fn process<'t>(&mut self, text: &'t str) -> Result<Cow<'t, str>, RollError> {
        self.substitute(text, |ctx, expr| ctx.evaluate(expr))
    }

    /// Like [RollContext::process], also returning the [Roll] behind each
    /// replacement, in order.
    pub fn process_detailed<'t>(
        &mut self,
        text: &'t str,
    ) -> Result<(Cow<'t, str>, Vec<Roll>), RollError> {
        let mut rolls = Vec::new();
        let text = self.substitute(text, |ctx, expr| {
            let roll = ctx.roll(expr)?;
            let total = roll.total();
            rolls.push(roll);
            Ok(total)
        })?;
        Ok((text, rolls))
    }

    fn substitute<'t>(
        &mut self,
        text: &'t str,
        mut roll: impl FnMut(&mut Self, &DiceExpression) -> Result<Total, RollError>,
    ) -> Result<Cow<'t, str>, RollError> {
        let mut occurrences = occurrences(text).peekable();
        if occurrences.peek().is_none() {
            return Ok(Cow::Borrowed(text));
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut count = 0usize;
        for Occurrence { expr, span } in occurrences {
            let total = roll(self, &expr)?;
            out.push_str(&text[cursor..span.start]);
            out.push_str(&total.to_string());
            cursor = span.end;
            count += 1;
        }
        out.push_str(&text[cursor..]);

        debug!(occurrences = count, "substituted dice notation");
        Ok(Cow::Owned(out))
    }
}
