//! Error handling for the boundary operations of Rivals Access.
//!
//! Access checks themselves never fail: denials are ordinary values
//! (`bool`, [`PolicyDecision`](crate::rbac::PolicyDecision), messages).
//! This module covers what sits around them:
//! - Parsing user records supplied by a session layer or a file
//! - Loading configuration
//! - [`enforce`](crate::rbac::enforce), for callers that prefer `?` over a boolean
//!
//! # Usage
//!
//! ```rust,ignore
//! use rivals_access_core::error::{AccessError, ErrorCode, ErrorContext, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_error_code(ErrorCode::IoError)
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

use crate::rbac::RoleId;

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for Rivals Access operations.
pub type Result<T> = std::result::Result<T, AccessError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Codes
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable error codes.
///
/// These codes are stable and can be used by callers for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authorization (4000-4099)
    Unauthenticated,
    Forbidden,

    // Input (4100-4199)
    UnknownRole,
    InvalidUserRecord,
    InvalidJson,
    InvalidYaml,

    // I/O (2000-2099)
    IoError,
    FileNotFound,

    // Serialization (2200-2299)
    SerializationError,

    // Configuration (5000-5099)
    ConfigurationError,
    MissingConfiguration,
    InvalidConfiguration,

    // Internal (9000-9099)
    InternalError,
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub const fn numeric_code(&self) -> u32 {
        match self {
            Self::Unauthenticated => 4000,
            Self::Forbidden => 4001,

            Self::UnknownRole => 4100,
            Self::InvalidUserRecord => 4101,
            Self::InvalidJson => 4102,
            Self::InvalidYaml => 4103,

            Self::IoError => 2000,
            Self::FileNotFound => 2001,

            Self::SerializationError => 2200,

            Self::ConfigurationError => 5000,
            Self::MissingConfiguration => 5001,
            Self::InvalidConfiguration => 5002,

            Self::InternalError => 9000,
        }
    }

    /// The HTTP status a REST layer should answer with.
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::FileNotFound => 404,
            Self::UnknownRole | Self::InvalidUserRecord | Self::InvalidJson | Self::InvalidYaml => 422,
            Self::IoError
            | Self::SerializationError
            | Self::ConfigurationError
            | Self::MissingConfiguration
            | Self::InvalidConfiguration
            | Self::InternalError => 500,
        }
    }

    /// Get the error category for grouping.
    pub const fn category(&self) -> &'static str {
        match self.numeric_code() {
            2000..=2099 => "io",
            2200..=2299 => "serialization",
            4000..=4099 => "authorization",
            4100..=4199 => "input",
            5000..=5099 => "configuration",
            9000..=9099 => "internal",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Severity
// ═══════════════════════════════════════════════════════════════════════════════

/// Severity level for errors (affects logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected outcomes: denials, bad input
    Low,
    /// Environment problems: missing files, unreadable config
    Medium,
    /// Bugs and unexpected failures
    High,
}

impl ErrorSeverity {
    /// Get severity based on error code.
    pub const fn from_code(code: &ErrorCode) -> Self {
        match code {
            ErrorCode::Unauthenticated
            | ErrorCode::Forbidden
            | ErrorCode::UnknownRole
            | ErrorCode::InvalidUserRecord
            | ErrorCode::InvalidJson
            | ErrorCode::InvalidYaml => Self::Low,

            ErrorCode::IoError
            | ErrorCode::FileNotFound
            | ErrorCode::ConfigurationError
            | ErrorCode::MissingConfiguration
            | ErrorCode::InvalidConfiguration => Self::Medium,

            ErrorCode::SerializationError | ErrorCode::InternalError => {
                Self::High
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Details
// ═══════════════════════════════════════════════════════════════════════════════

/// Additional structured details about an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Additional context key-value pairs
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,

    /// Related entity ID (user, role, file path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    /// Related entity type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    /// Suggested action for resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggested_action = Some(suggestion.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.context.is_empty()
            && self.entity_id.is_none()
            && self.entity_type.is_none()
            && self.suggested_action.is_none()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The main error type for Rivals Access.
///
/// This error type supports:
/// - Structured error codes
/// - Error chaining with context
/// - User-friendly vs internal messages
/// - HTTP status mapping for REST consumers
#[derive(Error, Debug)]
pub struct AccessError {
    /// Machine-readable error code
    code: ErrorCode,

    /// User-friendly error message (safe to show)
    user_message: Cow<'static, str>,

    /// Detailed internal message (for logging only)
    internal_message: Option<String>,

    /// Additional structured details
    details: ErrorDetails,

    /// The source error that caused this error
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.user_message)?;
        if let Some(ref internal) = self.internal_message {
            write!(f, " (internal: {})", internal)?;
        }
        Ok(())
    }
}

impl AccessError {
    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new error with code and user message.
    pub fn new(code: ErrorCode, user_message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            user_message: user_message.into(),
            internal_message: None,
            details: ErrorDetails::default(),
            source: None,
        }
    }

    /// Create an error with both user and internal messages.
    pub fn with_internal(
        code: ErrorCode,
        user_message: impl Into<Cow<'static, str>>,
        internal_message: impl Into<String>,
    ) -> Self {
        let mut error = Self::new(code, user_message);
        error.internal_message = Some(internal_message.into());
        error
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_internal(ErrorCode::InternalError, "An internal error occurred", message)
    }

    /// No user record was supplied for an action that needs more than the default role.
    pub fn unauthenticated(permission: &str) -> Self {
        Self::new(ErrorCode::Unauthenticated, "Authentication required")
            .with_context("permission", permission)
            .with_details_suggestion("Log in and retry")
    }

    /// The user's primary role does not grant `permission`.
    pub fn forbidden(role: RoleId, permission: &str) -> Self {
        Self::new(
            ErrorCode::Forbidden,
            format!("Role '{}' does not grant '{}'", role, permission),
        )
        .with_context("role", role)
        .with_context("permission", permission)
    }

    /// A role identifier outside the closed set.
    pub fn unknown_role(role: &str) -> Self {
        Self::new(ErrorCode::UnknownRole, format!("Unknown role: {}", role)).with_details(
            ErrorDetails::new()
                .with_entity("role", role)
                .with_suggestion("Expected one of: user, moderator, admin"),
        )
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::with_internal(
            ErrorCode::ConfigurationError,
            "Configuration error occurred",
            message,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Add error details.
    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = details;
        self
    }

    /// Add internal message.
    pub fn with_internal_message(mut self, message: impl Into<String>) -> Self {
        self.internal_message = Some(message.into());
        self
    }

    /// Add context to details.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.details.context.insert(key.into(), v);
        }
        self
    }

    fn with_details_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.details.suggested_action = Some(suggestion.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the user-friendly message.
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// Get the internal message (if any).
    pub fn internal_message(&self) -> Option<&str> {
        self.internal_message.as_deref()
    }

    /// Get the error details.
    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::from_code(&self.code)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────

    /// Log this error with appropriate severity.
    pub fn log(&self) {
        let code = self.code.to_string();
        let category = self.code.category();

        match self.severity() {
            ErrorSeverity::High => {
                error!(
                    error_code = %code,
                    category = category,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    details = ?self.details,
                    source = ?self.source,
                    "High severity error"
                );
            }
            ErrorSeverity::Medium => {
                warn!(
                    error_code = %code,
                    category = category,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    "Medium severity error"
                );
            }
            ErrorSeverity::Low => {
                tracing::debug!(
                    error_code = %code,
                    category = category,
                    user_message = %self.user_message,
                    "Low severity error"
                );
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Serialized form
// ═══════════════════════════════════════════════════════════════════════════════

/// Error envelope for machine consumers (REST handlers, `--output json`).
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Whether the request was successful (always false for errors)
    pub success: bool,

    /// Error information
    pub error: ErrorInfo,
}

/// Detailed error information.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Numeric error code
    pub numeric_code: u32,

    /// User-friendly error message
    pub message: String,

    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl From<&AccessError> for ErrorResponse {
    fn from(error: &AccessError) -> Self {
        Self {
            success: false,
            error: ErrorInfo {
                code: error.code,
                numeric_code: error.code.numeric_code(),
                message: error.user_message.to_string(),
                details: if error.details.is_empty() {
                    None
                } else {
                    Some(error.details.clone())
                },
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Context Extension Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with error code.
    fn with_error_code(self, code: ErrorCode) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| AccessError::internal(message.into()).with_source(e))
    }

    fn with_error_code(self, code: ErrorCode) -> Result<T> {
        self.map_err(|e| AccessError::new(code, e.to_string()).with_source(e))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AccessError::new(ErrorCode::InternalError, message.into()))
    }

    fn with_error_code(self, code: ErrorCode) -> Result<T> {
        self.ok_or_else(|| AccessError::new(code, "Value not present"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From Implementations for Common Error Types
// ═══════════════════════════════════════════════════════════════════════════════

impl From<serde_json::Error> for AccessError {
    fn from(error: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let (code, user_msg) = match error.classify() {
            Category::Syntax | Category::Eof => (ErrorCode::InvalidJson, "Invalid JSON"),
            Category::Data => (ErrorCode::InvalidUserRecord, "JSON does not describe a user record"),
            Category::Io => (ErrorCode::IoError, "Failed to read JSON input"),
        };

        Self::with_internal(code, user_msg, error.to_string()).with_source(error)
    }
}

impl From<serde_yaml::Error> for AccessError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::with_internal(ErrorCode::InvalidYaml, "Invalid YAML", error.to_string())
            .with_source(error)
    }
}

impl From<std::io::Error> for AccessError {
    fn from(error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, user_msg) = match error.kind() {
            ErrorKind::NotFound => (ErrorCode::FileNotFound, "File not found"),
            ErrorKind::PermissionDenied => (ErrorCode::IoError, "Permission denied while reading input"),
            _ => (ErrorCode::IoError, "An I/O error occurred"),
        };

        Self::with_internal(code, user_msg, error.to_string()).with_source(error)
    }
}

impl From<config::ConfigError> for AccessError {
    fn from(error: config::ConfigError) -> Self {
        let (code, user_msg) = match &error {
            config::ConfigError::NotFound(_) => (
                ErrorCode::MissingConfiguration,
                "Required configuration not found",
            ),
            config::ConfigError::PathParse(_) | config::ConfigError::FileParse { .. } => (
                ErrorCode::InvalidConfiguration,
                "Configuration file is invalid",
            ),
            _ => return Self::configuration(error.to_string()),
        };

        Self::with_internal(code, user_msg, error.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::Unauthenticated.http_status(), 401);
        assert_eq!(ErrorCode::Forbidden.http_status(), 403);
        assert_eq!(ErrorCode::InvalidUserRecord.http_status(), 422);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Forbidden.category(), "authorization");
        assert_eq!(ErrorCode::InvalidJson.category(), "input");
        assert_eq!(ErrorCode::MissingConfiguration.category(), "configuration");
    }

    #[test]
    fn test_forbidden_carries_context() {
        let error = AccessError::forbidden(RoleId::Moderator, "user_management");
        assert_eq!(error.code(), ErrorCode::Forbidden);
        assert_eq!(error.details().context["role"], "moderator");
        assert_eq!(error.details().context["permission"], "user_management");
        assert!(error.user_message().contains("moderator"));
    }

    #[test]
    fn test_unknown_role_details() {
        let error = AccessError::unknown_role("superuser");
        assert_eq!(error.details().entity_type.as_deref(), Some("role"));
        assert_eq!(error.details().entity_id.as_deref(), Some("superuser"));
        assert!(error.details().suggested_action.is_some());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AccessError::unauthenticated("admin_panel");
        let response = ErrorResponse::from(&error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("UNAUTHENTICATED"));
        assert!(json.contains("Authentication required"));
        assert!(json.contains("admin_panel"));
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let error = AccessError::new(ErrorCode::InternalError, "boom");
        let response = ErrorResponse::from(&error);
        assert!(response.error.details.is_none());
        assert_eq!(response.error.numeric_code, 9000);
    }

    #[test]
    fn test_from_serde_json_error() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AccessError::from(syntax).code(), ErrorCode::InvalidJson);
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let error = AccessError::from(io);
        assert_eq!(error.code(), ErrorCode::FileNotFound);
        assert_eq!(error.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_from_config_error() {
        let error = AccessError::from(config::ConfigError::Message("invalid type: string".into()));
        assert_eq!(error.code(), ErrorCode::ConfigurationError);
        assert_eq!(error.user_message(), "Configuration error occurred");
        assert_eq!(error.internal_message(), Some("invalid type: string"));

        let missing = AccessError::from(config::ConfigError::NotFound("telemetry".into()));
        assert_eq!(missing.code(), ErrorCode::MissingConfiguration);
    }

    #[test]
    fn test_error_context_trait() {
        let missing: Option<u8> = None;
        let error = missing.with_error_code(ErrorCode::MissingConfiguration).unwrap_err();
        assert_eq!(error.code(), ErrorCode::MissingConfiguration);
    }

    #[test]
    fn test_error_display() {
        let error = AccessError::with_internal(
            ErrorCode::InvalidConfiguration,
            "Configuration file is invalid",
            "expected table at line 3",
        );

        let display = format!("{}", error);
        assert!(display.contains("InvalidConfiguration"));
        assert!(display.contains("Configuration file is invalid"));
        assert!(display.contains("line 3"));
    }
}
