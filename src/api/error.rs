//! API error taxonomy and the user-facing message for each failure.

pub const MSG_NO_CONNECTION: &str = "No hay conexión con el servidor. Intenta nuevamente.";
pub const MSG_SERVER_ERROR: &str = "Error en el servidor. Estamos trabajando en ello.";
pub const MSG_BAD_REQUEST: &str = "Solicitud inválida. Revisa los datos e inténtalo otra vez.";

/// Errors produced by [`super::ApiClient`] requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401/403: the session is missing, expired or lacks permission.
    #[error("not authorized (status {status}); sign in again")]
    Unauthorized { status: u16 },

    /// The request never produced an HTTP response.
    #[error("no connection to the API: {0}")]
    Network(String),

    /// 5xx response.
    #[error("server error: status {status}")]
    Server { status: u16, body: String },

    /// 4xx response other than 401/403.
    #[error("request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// A non-success status outside 4xx/5xx.
    #[error("unexpected response status {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The bearer token could not be obtained.
    #[error("could not obtain access token: {0}")]
    Token(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status for errors that carry one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status }
            | Self::Server { status, .. }
            | Self::Rejected { status, .. }
            | Self::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. } | Self::Rejected { status: 429, .. })
    }

    /// Toast text shown to the admin. `None` for failures that are handled
    /// by re-authentication or that never reached the API.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Network(_) => Some(MSG_NO_CONNECTION.to_owned()),
            Self::Server { .. } => Some(MSG_SERVER_ERROR.to_owned()),
            Self::Rejected { message, .. } => Some(message.clone()),
            _ => None,
        }
    }
}

/// Map a non-success response to an [`ApiError`].
#[must_use]
pub fn classify_status(status: u16, body: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized { status },
        500..=599 => ApiError::Server { status, body: body.to_owned() },
        400..=499 => ApiError::Rejected { status, message: rejection_message(body) },
        _ => ApiError::UnexpectedStatus { status },
    }
}

/// Message for a 4xx payload: `message`, else `errors` joined with `, `,
/// else a generic prompt to review the input.
#[must_use]
pub fn rejection_message(body: &str) -> String {
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) else {
        return MSG_BAD_REQUEST.to_owned();
    };

    if let Some(message) = payload.get("message").and_then(|m| m.as_str()).filter(|m| !m.is_empty()) {
        return message.to_owned();
    }

    let errors: Vec<String> = payload
        .get("errors")
        .and_then(|e| e.as_array())
        .map(|items| {
            items
                .iter()
                .map(|item| match item.as_str() {
                    Some(s) => s.to_owned(),
                    None => item.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    if errors.is_empty() { MSG_BAD_REQUEST.to_owned() } else { errors.join(", ") }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
