use super::tree::{Die, Roll};
use crate::common::UInt;

/// Renders a [Roll] as a human readable breakdown, e.g.
/// `1d10+5b2 (1 -> 2 -> 7) = 12`.
pub trait Stringify {
    fn str_roll(&mut self, roll: &Roll) -> String {
        format!("{} ({}) = {}", roll.expr, self.str_dice(&roll.dice), roll.total())
    }

    fn str_dice(&mut self, dice: &[Die]) -> String {
        dice.iter()
            .map(|die| self.str_die(die))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn str_die(&mut self, die: &Die) -> String {
        die.faces
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[derive(Default, Debug, Copy, Clone)]
pub struct SimpleStringifier;

impl Stringify for SimpleStringifier {}

/// Markdown flavour: rerolled faces are struck through, natural 1s and maximum
/// faces are bold, and the total is set as code.
#[derive(Default, Debug, Copy, Clone)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    fn fmt_face(&self, face: UInt, sides: UInt, kept: bool) -> String {
        let mut ret = if face == 1 || face == sides {
            format!("**{}**", face)
        } else {
            face.to_string()
        };
        if !kept {
            ret = format!("~~{}~~", ret);
        }
        ret
    }
}

impl Stringify for MarkdownStringifier {
    fn str_roll(&mut self, roll: &Roll) -> String {
        format!("{} ({}) = `{}`", roll.expr, self.str_dice(&roll.dice), roll.total())
    }

    fn str_die(&mut self, die: &Die) -> String {
        let last = die.faces.len() - 1;
        die.faces
            .iter()
            .enumerate()
            .map(|(i, &face)| self.fmt_face(face, die.sides.get(), i == last))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
