use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::SYSTEM_ADMIN_ROLE;

/// Body de `POST /auth/login`. Nunca se persiste
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.trim().is_empty()
    }
}

// Debug manual para no volcar el password en los logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    VehicleOwner,
    WorkshopAdmin,
    SystemAdmin,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "VEHICLE_OWNER" => Some(UserRole::VehicleOwner),
            "WORKSHOP_ADMIN" => Some(UserRole::WorkshopAdmin),
            SYSTEM_ADMIN_ROLE => Some(UserRole::SystemAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::VehicleOwner => "VEHICLE_OWNER",
            UserRole::WorkshopAdmin => "WORKSHOP_ADMIN",
            UserRole::SystemAdmin => SYSTEM_ADMIN_ROLE,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    /// Se guarda tal cual llega; roles desconocidos no son admin
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl User {
    pub fn role_kind(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }

    pub fn is_system_admin(&self) -> bool {
        self.role_kind() == Some(UserRole::SystemAdmin)
    }
}

/// Formato `{ tokens: { accessToken, refreshToken, expiresIn } }`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundle {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Sin uso por ahora; puede llegar como número o como "15m"
    #[serde(default)]
    pub expires_in: Option<Value>,
}

/// Respuesta de login. Admite los dos formatos históricos del servicio
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub tokens: Option<TokenBundle>,
    #[serde(default)]
    pub user: Option<User>,
}

/// De qué campo salió el token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessToken {
    /// `access_token` en la raíz
    Primary(String),
    /// `tokens.accessToken`
    Fallback(String),
}

fn non_empty(token: Option<&String>) -> Option<String> {
    token
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

impl LoginResponse {
    /// Busca el token primero en `access_token`, luego en `tokens.accessToken`.
    /// Un string vacío cuenta como ausente.
    pub fn access_token(&self) -> Option<AccessToken> {
        if let Some(token) = non_empty(self.access_token.as_ref()) {
            return Some(AccessToken::Primary(token));
        }
        self.tokens
            .as_ref()
            .and_then(|bundle| non_empty(bundle.access_token.as_ref()))
            .map(AccessToken::Fallback)
    }
}
