use super::{error::RollError, roller::Roller, tree::*, RResult};
use crate::common::*;
use crate::expr::DiceExpression;
use rand::SeedableRng;
use tracing::{debug, trace};

pub type DefaultRoller = rand::rngs::StdRng;

/// The dice budget the REPL applies when none is configured.
pub const DEFAULT_MAX_DICE: usize = 1000;

/// Rolls [DiceExpression]s against a [Roller], counting dice against an
/// optional budget.
pub struct RollContext<R = DefaultRoller> {
    max_dice: Option<usize>,
    dice: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_dice: Option<usize>, roller: R) -> Self {
        Self {
            max_dice,
            dice: 0,
            roller,
        }
    }

    pub fn new_bounded(max_dice: usize, roller: R) -> Self {
        Self::new(Some(max_dice), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    /// Dice rolled so far, rerolls included.
    pub fn dice_rolled(&self) -> usize {
        self.dice
    }

    pub fn reset(&mut self) {
        self.dice = 0;
    }

    fn count_dice(&mut self, n: usize) -> RResult<()> {
        self.dice = self.dice.saturating_add(n);
        match self.max_dice {
            Some(limit) if self.dice > limit => Err(RollError::TooManyDice { limit }),
            _ => Ok(()),
        }
    }

    fn check_threshold(expr: &DiceExpression) -> RResult<()> {
        if expr.has_valid_threshold() {
            Ok(())
        } else {
            Err(RollError::InvalidThreshold {
                brutal: expr.brutal,
                die_type: expr.die_type.get(),
            })
        }
    }

    /// Rolls one die until its face beats `brutal`, handing every rejected
    /// face to `rejected`. Each reroll counts against the dice budget.
    fn roll_die(
        &mut self,
        sides: NonZeroUInt,
        brutal: UInt,
        mut rejected: impl FnMut(UInt),
    ) -> RResult<UInt> {
        let mut face = self.roller.roll(sides);
        while face <= brutal {
            trace!(face, brutal, "rerolling");
            self.count_dice(1)?;
            rejected(face);
            face = self.roller.roll(sides);
        }
        Ok(face)
    }

    /// Rolls every die of `expr`, rerolling faces at or below the brutal
    /// threshold, and keeps every face shown.
    ///
    /// # Errors
    ///
    /// [RollError::InvalidThreshold] if no face can beat the threshold, checked
    /// before anything is rolled. [RollError::TooManyDice] if the dice budget,
    /// rerolls included, would be exceeded.
    pub fn roll(&mut self, expr: &DiceExpression) -> RResult<Roll> {
        Self::check_threshold(expr)?;
        let num = expr.multiplicand.get() as usize;
        self.count_dice(num)?;

        let mut dice = Vec::with_capacity(num);
        for _ in 0..num {
            let mut rerolled = Vec::new();
            let face = self.roll_die(expr.die_type, expr.brutal, |f| rerolled.push(f))?;
            dice.push(Die::with_rerolls(expr.die_type, rerolled, face));
        }
        let roll = Roll::new(*expr, dice);
        debug!(expr = %expr, total = roll.total(), rerolls = roll.rerolls(), "rolled");
        Ok(roll)
    }

    /// Like [RollContext::roll], keeping only the total. Rejected faces are
    /// not stored.
    pub fn evaluate(&mut self, expr: &DiceExpression) -> RResult<Total> {
        Self::check_threshold(expr)?;
        let num = expr.multiplicand.get();
        self.count_dice(num as usize)?;

        let mut total = Total::from(expr.addend);
        for _ in 0..num {
            total += Total::from(self.roll_die(expr.die_type, expr.brutal, |_| ())?);
        }
        debug!(expr = %expr, total, "evaluated");
        Ok(total)
    }
}

impl RollContext {
    /// A context with a freshly seeded generator.
    pub fn from_entropy(max_dice: Option<usize>) -> Self {
        Self::new(max_dice, DefaultRoller::from_entropy())
    }
}

/// A freshly seeded context with no dice budget.
impl Default for RollContext {
    fn default() -> Self {
        Self::from_entropy(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::StepRoller;
    use proptest::prelude::*;

    fn mock_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    fn expr(s: &str) -> DiceExpression {
        s.parse().unwrap()
    }

    fn check(s: &str, expected: Total) {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        assert_eq!(ctx.evaluate(&expr(s)), Ok(expected));
    }

    #[test]
    fn test_eval_dice() {
        check("1d20+4", 10 + 4);
        check("2d4", 2 + 3);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
        check("d12", 10);
    }

    #[test]
    fn test_eval_brutal() {
        check("1d10b9", 10);
        check("2d10b9", 10 + 10);
        check("1d4b3", 4);
        check("3d6b4", 5 + 6 + 5);
    }

    #[test]
    fn test_brutal_face_history() {
        let mut ctx = RollContext::new_unbounded(StepRoller::new(NonZeroUInt::new(1).unwrap(), 1));
        let roll = ctx.roll(&expr("d10+5b2")).unwrap();
        assert_eq!(roll.dice.len(), 1);
        assert_eq!(roll.dice[0].faces.as_slice(), &[1, 2, 3]);
        assert_eq!(roll.total(), 8);
    }

    #[test]
    fn test_invalid_threshold() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        assert_eq!(
            ctx.evaluate(&expr("d6b6")),
            Err(RollError::InvalidThreshold { brutal: 6, die_type: 6 })
        );
        assert_eq!(
            ctx.evaluate(&expr("2d1b40")),
            Err(RollError::InvalidThreshold { brutal: 40, die_type: 1 })
        );
        // Nothing was rolled or counted.
        assert_eq!(ctx.dice_rolled(), 0);
        assert_eq!(ctx.evaluate(&expr("1d20")), Ok(10));
    }

    #[test]
    fn test_too_many_dice() {
        let mut ctx = RollContext::new_bounded(5, mock_roller());
        assert_eq!(
            ctx.evaluate(&expr("6d6")),
            Err(RollError::TooManyDice { limit: 5 })
        );

        ctx.reset();
        assert!(ctx.evaluate(&expr("3d6")).is_ok());
        assert!(ctx.evaluate(&expr("2d6")).is_ok());
        assert_eq!(ctx.dice_rolled(), 5);
        assert_eq!(
            ctx.evaluate(&expr("d6")),
            Err(RollError::TooManyDice { limit: 5 })
        );
    }

    #[test]
    fn test_rerolls_count_against_budget() {
        let mut ctx = RollContext::new_bounded(100, StepRoller::new(NonZeroUInt::new(1).unwrap(), 1));
        assert_eq!(ctx.evaluate(&expr("d10+5b2")), Ok(8));
        assert_eq!(ctx.dice_rolled(), 3);

        // The budget runs out while low faces are still being rejected.
        let mut ctx = RollContext::new_bounded(5, StepRoller::new(NonZeroUInt::new(1).unwrap(), 1));
        assert_eq!(
            ctx.roll(&expr("d10b9")),
            Err(RollError::TooManyDice { limit: 5 })
        );

        let mut ctx = RollContext::from_entropy(Some(1));
        assert_eq!(
            ctx.evaluate(&expr("d10000000b9999990")),
            Err(RollError::TooManyDice { limit: 1 })
        );
        assert_eq!(ctx.dice_rolled(), 2);
    }

    #[test]
    fn test_evaluate_matches_roll() {
        for s in ["1d20+4", "8d6", "3d6b4", "2d10+7b9"] {
            let e = expr(s);
            let rolled = RollContext::new_unbounded(mock_roller()).roll(&e).unwrap();
            let evaluated = RollContext::new_unbounded(mock_roller()).evaluate(&e);
            assert_eq!(evaluated, Ok(rolled.total()), "{}", s);
        }
    }

    #[test]
    fn test_unbounded() {
        let mut ctx = RollContext::new_unbounded(mock_roller());
        let total = ctx.evaluate(&expr("2000d1")).unwrap();
        assert_eq!(total, 2000);
        assert_eq!(RollContext::default().evaluate(&expr("1001d1")), Ok(1001));
    }

    #[test]
    fn test_range_repeated() {
        let e = expr("2d20+4");
        let mut ctx = RollContext::default();
        for _ in 0..500 {
            let total = ctx.evaluate(&e).unwrap();
            assert!((6..=44).contains(&total), "{} out of range", total);
            ctx.reset();
        }
    }

    #[test]
    fn test_brutal_floor_repeated() {
        let e = expr("d10+5b2");
        for _ in 0..1000 {
            let total = RollContext::default().evaluate(&e).unwrap();
            assert!((8..=15).contains(&total), "{} out of range", total);
        }
    }

    #[test]
    fn test_brutal_one_below_max() {
        let e = expr("3d20b19");
        for _ in 0..50 {
            assert_eq!(RollContext::default().evaluate(&e), Ok(60));
        }
    }

    #[test]
    fn test_brutal_reaches_every_allowed_face() {
        let e = expr("d6b3");
        let mut seen = [false; 6];
        let mut ctx = RollContext::from_entropy(None);
        for _ in 0..600 {
            seen[ctx.evaluate(&e).unwrap() as usize - 1] = true;
        }
        assert_eq!(seen, [false, false, false, true, true, true]);
    }

    proptest! {
        #[test]
        fn test_total_within_bounds(
            m in 1..=20u32,
            d in 1..=100u32,
            a in 0..=100u32,
            b_frac in 0.0..1.0f64,
            seed: u64,
        ) {
            let b = (b_frac * d as f64) as u32;
            let e = DiceExpression::try_from((m, d, a, b)).unwrap();
            prop_assume!(e.has_valid_threshold());

            let mut ctx = RollContext::new_unbounded(DefaultRoller::seed_from_u64(seed));
            let roll = ctx.roll(&e).unwrap();
            prop_assert!(roll.total() >= e.min_total());
            prop_assert!(roll.total() <= e.max_total());
            prop_assert_eq!(roll.dice.len(), m as usize);
            prop_assert!(roll.dice.iter().all(|die| die.value() > b));
        }
    }
}
