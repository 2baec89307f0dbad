use crate::common::UInt;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled (limit {limit})")]
    TooManyDice { limit: usize },
    #[error("brutal threshold {brutal} leaves no face of a d{die_type} to keep")]
    InvalidThreshold { brutal: UInt, die_type: UInt },
}
