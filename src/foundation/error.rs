use std::fmt;

use crate::assets::source::SourceRole;

/// Convenience result type used across reelsmith.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the timeline compiler and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The playlist document could not be fetched or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid user-provided playlist data.
    #[error("validation error: {0}")]
    Validation(String),

    /// One or more media sources failed to load. Always aggregated.
    #[error("source load error: {}", summarize_failures(.0))]
    SourceLoad(Vec<SourceFailure>),

    /// Errors raised while building or checking a schedule.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Errors reported by the player or compositor collaborator.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors reported by an export collaborator.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single failed source load, kept with the index it was requested under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFailure {
    /// Which input list the source came from.
    pub role: SourceRole,
    /// Index within that list (per-type for visual sources, track index for audio).
    pub index: usize,
    /// Locator as written in the playlist document.
    pub locator: String,
    /// Loader-provided reason.
    pub reason: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} '{}': {}",
            self.role, self.index, self.locator, self.reason
        )
    }
}

fn summarize_failures(failures: &[SourceFailure]) -> String {
    let mut out = format!("{} source(s) failed", failures.len());
    for failure in failures {
        out.push_str("; ");
        out.push_str(&failure.to_string());
    }
    out
}

impl ReelError {
    /// Build a [`ReelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`ReelError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`ReelError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
