//! Structured logging with JSON/pretty/compact formats and redaction of
//! personal data.
//!
//! - JSON format for production environments
//! - Pretty format for development
//! - Per-module log level configuration
//! - Redaction of e-mail addresses, passwords and session tokens
//!
//! Output goes to stderr so that command output on stdout stays parseable.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Global redactor instance for sensitive data.
static REDACTOR: OnceLock<SensitiveFieldRedactor> = OnceLock::new();

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty or compact)
    #[serde(default)]
    pub format: LogFormat,

    /// Per-module log levels
    #[serde(default)]
    pub module_levels: HashMap<String, String>,

    /// Whether to include file/line information
    #[serde(default = "default_include_location")]
    pub include_location: bool,

    /// Whether to include target (module path)
    #[serde(default = "default_include_target")]
    pub include_target: bool,

    /// Span event configuration
    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Redaction configuration
    #[serde(default)]
    pub redaction: RedactionConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            module_levels: HashMap::new(),
            include_location: default_include_location(),
            include_target: default_include_target(),
            span_events: SpanEventConfig::default(),
            redaction: RedactionConfig::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format for production/structured logging
    #[default]
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Configuration for span event logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub on_new: bool,

    #[serde(default)]
    pub on_close: bool,
}

impl SpanEventConfig {
    fn to_fmt_span(&self) -> FmtSpan {
        let mut span = FmtSpan::NONE;
        if self.on_new {
            span |= FmtSpan::NEW;
        }
        if self.on_close {
            span |= FmtSpan::CLOSE;
        }
        span
    }
}

/// Configuration for sensitive data redaction.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionConfig {
    /// Whether redaction is enabled
    #[serde(default = "default_redaction_enabled")]
    pub enabled: bool,

    /// Patterns to redact
    #[serde(default = "default_redaction_patterns")]
    pub patterns: Vec<RedactionPattern>,

    /// Replacement text for redacted values
    #[serde(default = "default_redaction_replacement")]
    pub replacement: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: default_redaction_enabled(),
            patterns: default_redaction_patterns(),
            replacement: default_redaction_replacement(),
        }
    }
}

/// A pattern for identifying sensitive data to redact.
#[derive(Debug, Clone, Deserialize)]
pub struct RedactionPattern {
    /// Name of this pattern (for debugging)
    pub name: String,

    /// Field names to match (case-insensitive, substring)
    #[serde(default)]
    pub field_names: Vec<String>,

    /// Regex pattern to match in values
    #[serde(default)]
    pub value_pattern: Option<String>,
}

/// Redactor for sensitive fields in log output.
#[derive(Debug, Clone)]
pub struct SensitiveFieldRedactor {
    patterns: Vec<CompiledRedactionPattern>,
    replacement: String,
    enabled: bool,
}

#[derive(Debug, Clone)]
struct CompiledRedactionPattern {
    field_names: Vec<String>,
    value_regex: Option<regex::Regex>,
}

impl SensitiveFieldRedactor {
    /// Create a new redactor from configuration.
    ///
    /// Patterns whose regex fails to compile keep their field-name matching.
    pub fn new(config: &RedactionConfig) -> Self {
        let patterns = config
            .patterns
            .iter()
            .map(|p| CompiledRedactionPattern {
                field_names: p.field_names.iter().map(|s| s.to_lowercase()).collect(),
                value_regex: p.value_pattern.as_ref().and_then(|pat| {
                    regex::Regex::new(pat)
                        .map_err(|e| {
                            tracing::warn!(pattern = %p.name, error = %e, "Ignoring invalid redaction regex")
                        })
                        .ok()
                }),
            })
            .collect();

        Self {
            patterns,
            replacement: config.replacement.clone(),
            enabled: config.enabled,
        }
    }

    /// Check if a field name should be redacted.
    pub fn should_redact_field(&self, field_name: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let lower = field_name.to_lowercase();
        self.patterns
            .iter()
            .any(|p| p.field_names.iter().any(|f| lower.contains(f)))
    }

    /// Redact every match of a value pattern.
    pub fn redact_value(&self, value: &str) -> String {
        if !self.enabled {
            return value.to_string();
        }

        let mut result = value.to_string();
        for pattern in &self.patterns {
            if let Some(regex) = &pattern.value_regex {
                result = regex.replace_all(&result, self.replacement.as_str()).into_owned();
            }
        }
        result
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Get the global redactor instance.
    ///
    /// Falls back to the default patterns when [`install_redactor`] has not run.
    pub fn global() -> &'static SensitiveFieldRedactor {
        REDACTOR.get_or_init(|| SensitiveFieldRedactor::new(&RedactionConfig::default()))
    }
}

/// Install the global redactor from configuration.
///
/// # Errors
///
/// Returns an error if the global redactor was already set, either by an
/// earlier call or by [`SensitiveFieldRedactor::global`].
pub fn install_redactor(config: &RedactionConfig) -> anyhow::Result<()> {
    REDACTOR
        .set(SensitiveFieldRedactor::new(config))
        .map_err(|_| anyhow::anyhow!("redactor already initialized; redaction config not applied"))
}

fn default_log_level() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

fn default_include_location() -> bool {
    true
}

fn default_include_target() -> bool {
    true
}

fn default_redaction_enabled() -> bool {
    true
}

fn default_redaction_replacement() -> String {
    "[REDACTED]".to_string()
}

fn default_redaction_patterns() -> Vec<RedactionPattern> {
    vec![
        RedactionPattern {
            name: "emails".to_string(),
            field_names: vec!["email".to_string(), "e-mail".to_string()],
            value_pattern: Some(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}".to_string()),
        },
        RedactionPattern {
            name: "passwords".to_string(),
            field_names: vec![
                "password".to_string(),
                "passwd".to_string(),
                "secret".to_string(),
            ],
            value_pattern: None,
        },
        RedactionPattern {
            name: "tokens".to_string(),
            field_names: vec![
                "token".to_string(),
                "bearer".to_string(),
                "jwt".to_string(),
                "authorization".to_string(),
                "session".to_string(),
            ],
            value_pattern: Some(r"eyJ[a-zA-Z0-9_-]+\.[a-zA-Z0-9_-]+\.[a-zA-Z0-9_-]+".to_string()),
        },
    ]
}

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `config` - Logging configuration
/// * `environment` - Current environment (development/production)
///
/// # Errors
///
/// Returns an error if the redactor or a global subscriber is already
/// installed, or if the filter is invalid.
pub fn init_logging(config: &LoggingConfig, environment: &str) -> anyhow::Result<()> {
    install_redactor(&config.redaction)?;

    let mut filter = EnvFilter::try_new(&config.level)?;
    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level);
        filter = filter.add_directive(directive.parse()?);
    }

    // Development prefers pretty output unless a non-default format was chosen.
    let format = if environment == "development" && config.format == LogFormat::Json {
        LogFormat::Pretty
    } else {
        config.format
    };

    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(config.span_events.to_fmt_span())
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_span_events(config.span_events.to_fmt_span())
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_span_events(config.span_events.to_fmt_span())
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// Structured log event builder; field values pass through the global redactor.
#[derive(Debug)]
pub struct LogEventBuilder {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, serde_json::Value>,
    user_id: Option<String>,
}

impl LogEventBuilder {
    /// Create a new log event at INFO level.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(tracing::Level::INFO, message)
    }

    /// Create a new log event at WARN level.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(tracing::Level::WARN, message)
    }

    /// Create a new log event at DEBUG level.
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(tracing::Level::DEBUG, message)
    }

    fn new(level: tracing::Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: HashMap::new(),
            user_id: None,
        }
    }

    /// Add a field to the log event.
    pub fn field(mut self, key: impl Into<String>, value: impl serde::Serialize) -> Self {
        let key = key.into();
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        let value = redact_json(SensitiveFieldRedactor::global(), &key, value);

        self.fields.insert(key, value);
        self
    }

    /// Attach the id of the user the event is about.
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Emit the log event.
    pub fn emit(self) {
        let fields_json = serde_json::to_string(&self.fields).unwrap_or_default();
        let user_id = self.user_id.as_deref().unwrap_or("-");

        match self.level {
            tracing::Level::ERROR => {
                tracing::error!(user_id = %user_id, fields = %fields_json, "{}", self.message)
            }
            tracing::Level::WARN => {
                tracing::warn!(user_id = %user_id, fields = %fields_json, "{}", self.message)
            }
            tracing::Level::INFO => {
                tracing::info!(user_id = %user_id, fields = %fields_json, "{}", self.message)
            }
            tracing::Level::DEBUG => {
                tracing::debug!(user_id = %user_id, fields = %fields_json, "{}", self.message)
            }
            tracing::Level::TRACE => {
                tracing::trace!(user_id = %user_id, fields = %fields_json, "{}", self.message)
            }
        }
    }
}

/// Redact a JSON value, descending into objects so nested `email` keys are caught.
fn redact_json(
    redactor: &SensitiveFieldRedactor,
    key: &str,
    value: serde_json::Value,
) -> serde_json::Value {
    use serde_json::Value;

    if redactor.should_redact_field(key) {
        return Value::String(redactor.replacement().to_string());
    }

    match value {
        Value::String(s) => Value::String(redactor.redact_value(&s)),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let v = redact_json(redactor, &k, v);
                    (k, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| redact_json(redactor, key, v))
                .collect(),
        ),
        other => other,
    }
}
