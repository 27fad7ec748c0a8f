//! Error and diagnostic types for declaration analysis.
//!
//! Every error is scoped to one declaration; none of them stops the run.

use std::fmt;
use thiserror::Error;

/// Error raised while analysing one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Ambiguous or missing required annotation data.
    #[error("classification error in '{declaration}': {message}")]
    Classification {
        /// Qualified name of the declaration.
        declaration: String,
        /// Error message.
        message: String,
    },

    /// Two members normalize to the same public name.
    #[error(
        "name collision in '{declaration}': '{second}' normalizes to '{public_name}', already taken by '{first}'"
    )]
    NameCollision {
        /// Qualified name of the declaration.
        declaration: String,
        /// Colliding public name.
        public_name: String,
        /// Member that owns the name.
        first: String,
        /// Member that was dropped.
        second: String,
    },

    /// A model link target was not found or failed namespace validation.
    #[error(
        "unresolved model link in '{declaration}': type '{target}' not found (namespace filter: {})",
        .namespace.as_deref().unwrap_or("none")
    )]
    Resolution {
        /// Qualified name of the declaration.
        declaration: String,
        /// Target type name.
        target: String,
        /// Namespace validation string, if any.
        namespace: Option<String>,
    },

    /// A theme variant name could not be extracted.
    #[error(
        "malformed theme variant '{type_ref}' on member '{member}' of '{declaration}'"
    )]
    Expansion {
        /// Qualified name of the declaration.
        declaration: String,
        /// Storage name of the member.
        member: String,
        /// Variant type reference as written.
        type_ref: String,
    },
}

impl AnalysisError {
    /// Creates a classification error.
    pub fn classification(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Classification {
            declaration: declaration.into(),
            message: message.into(),
        }
    }

    /// Returns the qualified name of the declaration the error belongs to.
    #[must_use]
    pub fn declaration(&self) -> &str {
        match self {
            Self::Classification { declaration, .. }
            | Self::NameCollision { declaration, .. }
            | Self::Resolution { declaration, .. }
            | Self::Expansion { declaration, .. } => declaration,
        }
    }

    /// Returns the severity of this error for its declaration's output.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Classification { .. }
            | Self::NameCollision { .. }
            | Self::Resolution { .. } => Severity::Error,
            Self::Expansion { .. } => Severity::Warning,
        }
    }

    /// Returns the stable diagnostic code of this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Classification { .. } => "WEFT001",
            Self::NameCollision { .. } => "WEFT002",
            Self::Resolution { .. } => "WEFT003",
            Self::Expansion { .. } => "WEFT004",
        }
    }
}

/// Effect of a diagnostic on its declaration's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// The offending part was left out; the rest of the unit is emitted.
    Warning,
    /// The declaration's output is missing or lost a user member; the run fails.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Structured diagnostic attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity for the declaration's output.
    pub severity: Severity,
    /// Underlying error.
    pub error: AnalysisError,
}

impl Diagnostic {
    /// Returns the qualified name of the offending declaration.
    #[must_use]
    pub fn declaration(&self) -> &str {
        self.error.declaration()
    }
}

impl From<AnalysisError> for Diagnostic {
    fn from(error: AnalysisError) -> Self {
        Self {
            severity: error.severity(),
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.error.code(), self.error)
    }
}
