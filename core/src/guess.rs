use crate::*;

/// What the guess field currently holds, used for live feedback while typing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputState {
    Empty,
    Valid(GuessValue),
    Invalid,
}

impl InputState {
    pub fn of(input: &str) -> Self {
        if input.trim().is_empty() {
            Self::Empty
        } else {
            parse_guess(input).map_or(Self::Invalid, Self::Valid)
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub const fn is_invalid(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

/// Parses a whole decimal integer in `MIN_GUESS..=MAX_GUESS`, surrounding whitespace allowed.
pub fn parse_guess(input: &str) -> Result<GuessValue> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidGuess)?;
    if (i64::from(MIN_GUESS)..=i64::from(MAX_GUESS)).contains(&value) {
        // range checked above
        Ok(value as GuessValue)
    } else {
        Err(ClientError::InvalidGuess)
    }
}
