//! Error type shared by every Quarry crate.
//!
//! Backend failures, local storage failures and session-state violations all
//! become an [`AppError`] tagged with an [`ErrorKind`], so callers branch on
//! the kind and never on message text.

use std::fmt;
use thiserror::Error;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The backend has no such resource.
    NotFound,
    /// Bad credentials, or the bearer token expired or was revoked.
    Authentication,
    /// The permission map does not grant the requested action.
    Authorization,
    /// Input was rejected locally or by the backend.
    Validation,
    /// The backend reported a conflict (duplicate user, etc.).
    Conflict,
    /// The request never produced an HTTP response.
    Network,
    /// The request was aborted because its company scope ended.
    Cancelled,
    /// A bug or broken invariant on our side.
    Internal,
    /// Local token storage failed.
    Storage,
    /// Configuration could not be read.
    Configuration,
    /// The session is not in a state that allows the operation.
    Session,
    /// A payload could not be encoded or decoded.
    Serialization,
    /// The backend answered with an unexpected error status.
    ExternalService,
}

impl ErrorKind {
    /// Stable upper-case tag, also used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authentication => "AUTHENTICATION",
            Self::Authorization => "AUTHORIZATION",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Network => "NETWORK",
            Self::Cancelled => "CANCELLED",
            Self::Internal => "INTERNAL",
            Self::Storage => "STORAGE",
            Self::Configuration => "CONFIGURATION",
            Self::Session => "SESSION",
            Self::Serialization => "SERIALIZATION",
            Self::ExternalService => "EXTERNAL_SERVICE",
        }
    }

    /// Kinds that originate at the backend boundary rather than locally.
    pub const fn is_remote(self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::Authentication
                | Self::Authorization
                | Self::Validation
                | Self::Conflict
                | Self::Network
                | Self::ExternalService
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized failure with an optional backend-supplied detail.
///
/// `message` is meant for logs. `detail` is set only when the backend sent
/// a `detail` string in its error body; it is shown to the operator
/// verbatim.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Category.
    pub kind: ErrorKind,
    /// Log-oriented description.
    pub message: String,
    /// Backend-supplied detail string.
    pub detail: Option<String>,
    /// Underlying cause, when one exists.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// One shorthand constructor per kind.
macro_rules! kind_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)+) => {
        $(
            $(#[$doc])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )+
    };
}

impl AppError {
    /// Error of `kind` without a cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    /// Error of `kind` wrapping `source`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(kind, message)
        }
    }

    kind_constructors! {
        /// The backend has no such resource.
        not_found => NotFound;
        /// Credentials or token rejected.
        authentication => Authentication;
        /// Permission map lacks the action.
        authorization => Authorization;
        /// Input rejected.
        validation => Validation;
        /// Backend conflict.
        conflict => Conflict;
        /// No HTTP response.
        network => Network;
        /// Company scope ended mid-request.
        cancelled => Cancelled;
        internal => Internal;
        storage => Storage;
        configuration => Configuration;
        /// Operation not allowed in the current session state.
        session => Session;
        /// Unexpected backend status.
        external_service => ExternalService;
    }

    /// Attach the backend's detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Operator-facing text: the backend detail when present.
    pub fn display_message(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.message)
    }

    /// Whether this error means the bearer token is no longer accepted.
    pub fn is_auth_expired(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }
}

impl Clone for AppError {
    /// The boxed cause is not cloneable and is dropped.
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            detail: self.detail.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("Invalid JSON: {err}"), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
