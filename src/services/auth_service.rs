use crate::config::UnauthorizedPolicy;
use crate::models::{Credentials, LoginResponse};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::services::http::HttpTransport;
use crate::utils::{KeyValueStorage, LOGIN_PATH};

/// Cliente del identity service
pub struct AuthService<T: HttpTransport, S: KeyValueStorage> {
    client: ApiClient<T, S>,
}

impl<T: HttpTransport, S: KeyValueStorage> Clone for AuthService<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStorage> AuthService<T, S> {
    pub fn new(client: ApiClient<T, S>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`. No toca la sesión: eso lo decide el flujo de login.
    /// Un 401 aquí son credenciales inválidas, no una sesión caducada, así que
    /// no pasa por el hook de invalidación.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 Login para: {}", credentials.email);
        self.client
            .with_policy(UnauthorizedPolicy::Ignore)
            .post_json(LOGIN_PATH, credentials)
            .await
    }
}
