// ============================================================================
// API ERROR - Errores de comunicación con los backends
// ============================================================================

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// El request no llegó a completarse (sin respuesta HTTP)
    #[error("Network error: {0}")]
    Network(String),

    /// 401 del backend. `session_cleared` indica si el hook borró la sesión
    #[error("Unauthorized{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unauthorized {
        message: Option<String>,
        session_cleared: bool,
    },

    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request build error: {0}")]
    Build(String),
}

impl ApiError {
    /// Construye el error a partir de un status no exitoso y su body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(body);
        if status == 401 {
            ApiError::Unauthorized {
                message,
                session_cleared: false,
            }
        } else {
            ApiError::Http { status, message }
        }
    }

    /// Mensaje que envió el backend en su payload de error, si lo hay
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message, .. } | ApiError::Http { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Texto para el usuario: mensaje del backend o el fallback
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Extrae `message` de un body JSON de error.
///
/// Acepta `{"message": "..."}` y `{"message": ["a", "b"]}` (errores de
/// validación), que se unen con ", ".
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
