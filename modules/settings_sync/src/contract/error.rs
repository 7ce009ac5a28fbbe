//! Contract error types for settings synchronization
//!
//! These errors are transport-agnostic; the REST layer maps them to
//! Problem Details responses.

use thiserror::Error;

/// Domain errors surfaced by the settings service
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A store write was rejected. Keys already written in the same call
    /// stay written and the cache keeps serving the pre-update snapshot.
    #[error("failed to persist setting '{key}'")]
    Persistence {
        /// Setting key whose upsert failed
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A store read failed while (re)building the snapshot. The cache
    /// stays empty so the next read retries.
    #[error("failed to load settings from the store")]
    Load {
        #[source]
        source: anyhow::Error,
    },

    /// The write payload was malformed
    #[error("invalid settings payload: {message}")]
    Validation {
        /// What was wrong with the payload
        message: String,
    },
}
