//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    #[error("{0}")]
    Executor(#[from] ExecutorError),

    #[error("Executor thread panicked")]
    ExecutorPanicked,
}

/// Reading inputs and expected answers from the inputs directory
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    InputRead {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    #[error("Solver execution failed: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    #[error("Channel send error")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ExecutorError>),
}

impl ExecutorError {
    /// Merge two errors into one flat `Multiple`, keeping `first`'s errors
    /// ahead of `second`'s.
    pub fn combine(first: ExecutorError, second: ExecutorError) -> ExecutorError {
        let mut errors = first.into_flat();
        errors.extend(second.into_flat());
        ExecutorError::Multiple(errors)
    }

    pub fn combine_opt(existing: Option<ExecutorError>, new: ExecutorError) -> ExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    fn into_flat(self) -> Vec<ExecutorError> {
        match self {
            ExecutorError::Multiple(errors) => errors,
            single => vec![single],
        }
    }
}
