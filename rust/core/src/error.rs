// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for design document handling.

/// Result type alias for design document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a design document.
///
/// Missing or out-of-range fields are never errors; they are repaired by the
/// normalizer. Only input that cannot be treated as a mapping fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input parsed, but is not a design document mapping.
    #[error("malformed design document: `{section}` {reason}")]
    MalformedInput { section: String, reason: String },

    /// The input is not valid JSON.
    #[error("invalid JSON in {context} at line {line}, column {column}: {source}", line = .source.line(), column = .source.column())]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A normalized document could not be turned back into JSON.
    #[error("failed to serialize design document: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(section: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            section: section.into(),
            reason: reason.into(),
        }
    }

    /// The document section the error refers to.
    pub fn section(&self) -> &str {
        match self {
            Error::MalformedInput { section, .. } => section,
            Error::Json { context, .. } => context,
            Error::Serialization(_) => "document",
        }
    }
}
