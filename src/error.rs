use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geo::GeoError;

/// Errors raised while reading or validating the configuration.
///
/// All of these are fatal and surface before the simulation loop starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("key '{key}' appears before any section header")]
    MissingSectionHeader { key: String },

    #[error("section [{0}] is defined more than once")]
    DuplicateSection(String),

    #[error("key '{key}' is defined more than once in section [{section}]")]
    DuplicateKey { section: String, key: String },

    #[error("missing config section [{0}]")]
    MissingSection(String),

    #[error("missing key '{key}' in section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("invalid value '{value}' for [{section}] {key}: expected {expected}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("value out of range for [{section}] {key}: {reason}")]
    OutOfRange {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unsupported motion type '{value}' in section [{section}]")]
    UnsupportedMotionType { section: String, value: String },
}

/// Errors raised by the simulation engine and the track writers.
#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("numeric degeneracy for missile '{id}' at t={elapsed:.3}s: {detail}")]
    NumericDegeneracy {
        id: String,
        elapsed: f64,
        detail: String,
    },

    #[error("geometry error for missile '{id}': {source}")]
    Geometry {
        id: String,
        #[source]
        source: GeoError,
    },

    #[error("failed to write track output: {0}")]
    Io(#[from] io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
