//! Error types for the Hyperfruit engine.
//!
//! This module provides a unified error type [`Error`] and a convenient [`Result`] alias.
//! Misses, no-hits and merges are ordinary values and never surface here.

use std::fmt;

/// Main error type for the engine.
#[derive(Debug)]
pub enum Error {
    /// `add_object` was called with every pool slot occupied.
    PoolExhausted {
        /// Fixed capacity of the object pool.
        capacity: usize,
    },
    /// A configuration value is outside its valid range.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A configuration document could not be parsed.
    ConfigParse(String),
    /// A worker thread could not be spawned.
    ThreadSpawn(std::io::Error),
}

impl Error {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PoolExhausted { capacity } => {
                write!(f, "object pool exhausted (capacity={capacity})")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            Self::ConfigParse(msg) => write!(f, "configuration parse error: {msg}"),
            Self::ThreadSpawn(err) => write!(f, "failed to spawn worker thread: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ThreadSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Convenience alias used by every fallible engine call.
pub type Result<T> = std::result::Result<T, Error>;
