use thiserror::Error;

use crate::state::State;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StateMismatchError {
    #[error("State names do not match.")]
    Name,
    #[error("State queries do not match.")]
    Query,
    #[error("State properties do not match.")]
    Properties,
}

/// Checks name, then query, then properties; the first mismatch wins.
pub fn check_comparable(start: &State, end: &State) -> Result<(), StateMismatchError> {
    if start.name != end.name {
        return Err(StateMismatchError::Name);
    }
    if start.validation_query != end.validation_query {
        return Err(StateMismatchError::Query);
    }
    if start.properties != end.properties {
        return Err(StateMismatchError::Properties);
    }
    Ok(())
}
