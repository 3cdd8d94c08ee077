use serde::{Deserialize, Serialize};

const DEFAULT_AUTH_BASE_URL: &str = "https://auth-service-autogiad.onrender.com";
const DEFAULT_WORKSHOP_BASE_URL: &str =
    "https://workshop-service-autodiag.onrender.com/api/workshops/workshops";

/// Qué hacer cuando un backend responde 401
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnauthorizedPolicy {
    /// Devolver el error al llamador sin tocar la sesión
    #[default]
    Ignore,
    /// Borrar la sesión local (el router vuelve al login)
    ClearSession,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub auth_base_url: String,
    pub workshop_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub unauthorized_policy: UnauthorizedPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            workshop_base_url: DEFAULT_WORKSHOP_BASE_URL.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            unauthorized_policy: UnauthorizedPolicy::Ignore,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            auth_base_url: option_env!("AUTH_BASE_URL")
                .unwrap_or(DEFAULT_AUTH_BASE_URL)
                .to_string(),
            workshop_base_url: option_env!("WORKSHOP_BASE_URL")
                .unwrap_or(DEFAULT_WORKSHOP_BASE_URL)
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("production")
                .to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            unauthorized_policy: Self::parse_policy(option_env!("LOGOUT_ON_UNAUTHORIZED")),
        }
    }

    /// `LOGOUT_ON_UNAUTHORIZED=true` activa el logout automático en 401
    fn parse_policy(raw: Option<&str>) -> UnauthorizedPolicy {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "true" || v == "1" => UnauthorizedPolicy::ClearSession,
            _ => UnauthorizedPolicy::Ignore,
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, UnauthorizedPolicy::Ignore)]
    #[case(Some("false"), UnauthorizedPolicy::Ignore)]
    #[case(Some("yes-please"), UnauthorizedPolicy::Ignore)]
    #[case(Some("true"), UnauthorizedPolicy::ClearSession)]
    #[case(Some(" TRUE "), UnauthorizedPolicy::ClearSession)]
    #[case(Some("1"), UnauthorizedPolicy::ClearSession)]
    fn parses_unauthorized_policy(#[case] raw: Option<&str>, #[case] expected: UnauthorizedPolicy) {
        assert_eq!(AppConfig::parse_policy(raw), expected);
    }

    #[test]
    fn default_keeps_401_hook_inert() {
        let config = AppConfig::default();
        assert_eq!(config.unauthorized_policy, UnauthorizedPolicy::Ignore);
        assert!(config.workshop_base_url.ends_with("/api/workshops/workshops"));
    }
}
