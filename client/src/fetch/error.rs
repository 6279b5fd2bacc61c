//! Error types for schedule fetches.
//!
//! Transport, protocol and schema failures all end up as a single reported
//! message in the cache; the variants exist so callers and logs can tell them
//! apart.

use std::fmt;

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Structured context describing where a fetch failed.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_week", "load_config")
    pub operation: Option<String>,
    /// Search context of the request, rendered as `type=query`
    pub search: Option<String>,
    /// Academic week of the request
    pub week: Option<u32>,
    /// Additional details about the error
    pub details: Option<String>,
    /// Whether retrying the same request may succeed
    pub retryable: bool,
}

impl ErrorContext {
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.search.is_none()
            && self.week.is_none()
            && self.details.is_none()
            && !self.retryable
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref search) = self.search {
            parts.push(format!("search={}", search));
        }
        if let Some(week) = self.week {
            parts.push(format!("week={}", week));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, " [{}]", parts.join(", "))
    }
}

/// Error type for fetch operations
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete (connect, timeout, body read).
    #[error("Transport error: {message}{context}")]
    Transport {
        message: String,
        context: ErrorContext,
    },

    /// The server answered with a non-success status.
    #[error("Protocol error: HTTP {status}: {message}{context}")]
    Protocol {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// The response body is missing required fields or is not valid JSON.
    #[error("Schema error: {message}{context}")]
    Schema {
        message: String,
        context: ErrorContext,
    },

    /// Client configuration could not be loaded or is invalid.
    #[error("Configuration error: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        let context = ErrorContext::default();
        Self::Protocol {
            status,
            message: message.into(),
            // 5xx and 429 are worth another attempt; other statuses are not.
            context: if status >= 500 || status == 429 {
                context.retryable()
            } else {
                context
            },
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Transport { context, .. }
            | Self::Protocol { context, .. }
            | Self::Schema { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Transport { context, .. }
            | Self::Protocol { context, .. }
            | Self::Schema { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    /// Set the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Attach the request's search context and week.
    pub fn for_request(mut self, search: impl ToString, week: u32) -> Self {
        let context = self.context_mut();
        context.search = Some(search.to_string());
        context.week = Some(week);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.context_mut().details = Some(details.into());
        self
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::schema(err.to_string())
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let context = ErrorContext::default().retryable();
        let context = if err.is_timeout() {
            context.with_details("timeout")
        } else if err.is_connect() {
            context.with_details("connect")
        } else {
            context
        };
        FetchError::Transport {
            message: err.to_string(),
            context,
        }
    }
}
