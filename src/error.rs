use crate::basic::board::ConfigError;
use ggez::GameError;
use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};
use std::{fmt, result};

#[derive(Debug)]
pub enum ErrorType {
    GameError(GameError),
    Config(ConfigError),
    /// Growing the body or building the grid ran out of memory
    Allocation(TryReserveError),
}

/// The second member contains a trace in reverse order
#[must_use]
pub struct Error(ErrorType, Vec<String>);

impl From<GameError> for Error {
    fn from(e: GameError) -> Self {
        Self(ErrorType::GameError(e), vec![])
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self(ErrorType::Config(e), vec![])
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Self(ErrorType::Allocation(e), vec![])
    }
}

impl Error {
    pub fn with_trace_step<S: ToString>(mut self, s: S) -> Self {
        self.1.push(s.to_string());
        self
    }

    pub fn error_type(&self) -> &ErrorType {
        &self.0
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error:\n{:?}\nTrace:", self.0)?;
        for t in (self.1).iter().rev() {
            writeln!(f, " in {}", t)?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorType::GameError(e) => write!(f, "graphics error: {}", e),
            ErrorType::Config(e) => write!(f, "invalid configuration: {}", e),
            ErrorType::Allocation(e) => write!(f, "allocation failed: {}", e),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T = ()> = result::Result<T, Error>;

pub trait ErrorConversion {
    fn with_trace_step<S: ToString>(self, s: S) -> Self;
}

impl<T> ErrorConversion for Result<T> {
    fn with_trace_step<S: ToString>(self, s: S) -> Self {
        self.map_err(|e| e.with_trace_step(s.to_string()))
    }
}

#[test]
fn test_trace_is_printed_innermost_last() {
    let err: Result = Err(Error::from(ConfigError::ZeroCellSize))
        .with_trace_step("Board::validate")
        .with_trace_step("Game::new");
    let printed = format!("{:?}", err.unwrap_err());
    let inner = printed.find("Board::validate").unwrap();
    let outer = printed.find("Game::new").unwrap();
    assert!(outer < inner);
}
