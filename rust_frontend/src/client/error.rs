//! Error types for API client operations.
//!
//! Every failure carries an [`ErrorContext`] naming the call that failed, so
//! a view can log it and still show the user a short message.

use std::fmt;

/// Result type for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Where an error happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The call being made (e.g., "list_reservations", "login")
    pub operation: Option<String>,
    /// The entity involved (e.g., "bath", "reservation")
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API could not be reached or the exchange broke off.
    #[error("Connection error: {message} {context}")]
    Connection {
        message: String,
        context: ErrorContext,
    },

    /// Non-success status. `message` is the server's `detail` when it sent one.
    #[error("HTTP {status}: {message} {context}")]
    Status {
        status: u16,
        message: String,
        context: ErrorContext,
    },

    /// 401/403, or an admin call without a token.
    #[error("Unauthorized: {message} {context}")]
    Unauthorized {
        message: String,
        context: ErrorContext,
    },

    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// The response body did not have the expected shape.
    #[error("Decode error: {message} {context}")]
    Decode {
        message: String,
        context: ErrorContext,
    },

    /// The request was rejected by a business rule.
    #[error("Validation error: {message} {context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl ClientError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
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

    /// Map a non-success HTTP status onto the matching variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => Self::unauthorized(message),
            404 => Self::not_found(message),
            400 | 409 | 422 => Self::Validation {
                message: message.into(),
                context: ErrorContext::default().with_details(format!("status={}", status)),
            },
            _ => Self::status(status, message),
        }
    }

    /// The short message meant for the user, without context.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message, .. }
            | Self::Status { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::NotFound { message, .. }
            | Self::Decode { message, .. }
            | Self::Validation { message, .. }
            | Self::Configuration { message, .. } => message,
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Status { context, .. }
            | Self::Unauthorized { context, .. }
            | Self::NotFound { context, .. }
            | Self::Decode { context, .. }
            | Self::Validation { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Connection { context, .. }
            | Self::Status { context, .. }
            | Self::Unauthorized { context, .. }
            | Self::NotFound { context, .. }
            | Self::Decode { context, .. }
            | Self::Validation { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>, id: impl ToString) -> Self {
        let context = self.context_mut();
        context.entity = Some(entity.into());
        context.entity_id = Some(id.to_string());
        self
    }

    /// HTTP status the gateway answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 401,
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Configuration { .. } => 500,
            Self::Connection { .. } | Self::Status { .. } | Self::Decode { .. } => 502,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ClientError::decode(err.to_string());
        }
        match err.status() {
            Some(status) => ClientError::from_status(status.as_u16(), err.to_string()),
            None => ClientError::Connection {
                message: err.to_string(),
                context: ErrorContext::default()
                    .with_details(if err.is_timeout() { "timeout" } else { "transport" }),
            },
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::decode(err.to_string())
    }
}
