use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("no dice notation at the start of the input")]
    NoDice,
    #[error("unexpected input after dice notation at position {position}")]
    TrailingInput { position: usize },
    #[error("dice count and die type must be at least 1")]
    ZeroDice,
}
