use crate::ast::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for the Friends system with source location tracking
///
/// A query that cannot be proven is not an error: it simply has no solutions.
#[derive(Debug, Clone)]
pub enum FriendsError {
    /// Parse error with source location
    Parse(Box<ErrorDetails>),

    /// Engine error without specific source location
    Engine(String),

    /// A configured limit was hit
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

impl FriendsError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }

    /// Same error, attributed to another source (e.g. the file a paragraph came from)
    pub fn with_source_id(self, source_id: impl Into<String>) -> Self {
        match self {
            FriendsError::Parse(mut details) => {
                details.source_id = source_id.into();
                FriendsError::Parse(details)
            }
            other => other,
        }
    }
}

impl fmt::Display for FriendsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriendsError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            FriendsError::Engine(msg) => write!(f, "Engine error: {}", msg),
            FriendsError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Resource limit exceeded: {} (limit: {}, actual: {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
        }
    }
}

impl std::error::Error for FriendsError {}

impl From<std::fmt::Error> for FriendsError {
    fn from(err: std::fmt::Error) -> Self {
        FriendsError::Engine(format!("Format error: {}", err))
    }
}
