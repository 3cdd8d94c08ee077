// ============================================================================
// API CLIENT - pipeline de requests autenticados
// ============================================================================
// Antes de enviar: lee el token del SessionStore y añade `Bearer`.
// Después de recibir: un 401 pasa por el hook de UnauthorizedPolicy, el
// resto de errores se devuelven sin tocar.
// Sin estado propio: una instancia por backend, misma política.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::UnauthorizedPolicy;
use crate::services::error::ApiError;
use crate::services::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::stores::SessionStore;
use crate::utils::KeyValueStorage;

pub struct ApiClient<T: HttpTransport, S: KeyValueStorage> {
    name: &'static str,
    base_url: String,
    transport: Rc<T>,
    session: SessionStore<S>,
    unauthorized_policy: UnauthorizedPolicy,
}

impl<T: HttpTransport, S: KeyValueStorage> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            base_url: self.base_url.clone(),
            transport: Rc::clone(&self.transport),
            session: self.session.clone(),
            unauthorized_policy: self.unauthorized_policy,
        }
    }
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    /// `name` solo se usa en los logs ("auth", "workshops")
    pub fn new(
        name: &'static str,
        base_url: impl Into<String>,
        transport: Rc<T>,
        session: SessionStore<S>,
        unauthorized_policy: UnauthorizedPolicy,
    ) -> Self {
        Self {
            name,
            base_url: base_url.into(),
            transport,
            session,
            unauthorized_policy,
        }
    }

    /// Copia del cliente con otra política de 401
    pub fn with_policy(&self, unauthorized_policy: UnauthorizedPolicy) -> Self {
        Self {
            unauthorized_policy,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// `""` apunta a la base misma
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            base.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Content-Type + Bearer del token actual (si existe)
    fn decorate(&self, request: &mut HttpRequest) {
        request.set_header("Content-Type", "application/json");
        match self.session.get_token() {
            Some(token) => {
                log::debug!("🔑 [{}] Token añadido a {} {}", self.name, request.method.as_str(), request.url);
                request.set_header("Authorization", format!("Bearer {}", token));
            }
            None => {
                log::warn!("⚠️ [{}] Sin token para {} {}", self.name, request.method.as_str(), request.url);
            }
        }
    }

    /// Hook de 401: según la política, invalida la sesión local
    fn on_unauthorized(&self, error: ApiError) -> ApiError {
        let ApiError::Unauthorized { message, .. } = error else {
            return error;
        };
        let session_cleared = match self.unauthorized_policy {
            UnauthorizedPolicy::Ignore => {
                log::warn!("🚫 [{}] 401 recibido, sesión conservada", self.name);
                false
            }
            UnauthorizedPolicy::ClearSession => {
                log::warn!("🚫 [{}] 401 recibido, cerrando sesión", self.name);
                if let Err(e) = self.session.clear_auth() {
                    log::error!("❌ [{}] Error limpiando sesión: {}", self.name, e);
                }
                true
            }
        };
        ApiError::Unauthorized {
            message,
            session_cleared,
        }
    }

    fn after_response(&self, response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let error = ApiError::from_status(response.status, &response.body);
        if error.is_unauthorized() {
            return Err(self.on_unauthorized(error));
        }
        log::error!("❌ [{}] {}", self.name, error);
        Err(error)
    }

    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest::new(method, self.url(path));
        request.body = body;
        self.decorate(&mut request);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [{}] {}", self.name, e);
            e
        })?;
        self.after_response(response)
    }

    /// GET que devuelve el JSON crudo; body vacío = `None`.
    /// Un 2xx con body que no es JSON llega como `Value::String` (texto plano).
    pub async fn get_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
        let response = self.execute(HttpMethod::Get, path, None).await?;
        Ok(parse_lenient_json(self.name, &response.body))
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_string(body)
            .map_err(|e| ApiError::Build(format!("Serialization error: {}", e)))?;
        let response = self.execute(HttpMethod::Post, path, Some(payload)).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// PATCH sin body; solo interesa el status
    pub async fn patch(&self, path: &str) -> Result<(), ApiError> {
        self.execute(HttpMethod::Patch, path, None).await.map(|_| ())
    }
}

fn parse_lenient_json(name: &str, body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [{}] Body no JSON ({}), se trata como texto", name, e);
            Some(Value::String(body.to_string()))
        }
    }
}
