// ============================================================================
// LOGIN VIEWMODEL - autenticación + gate de rol
// ============================================================================
// El identity service autentica; aquí se autoriza. Solo SYSTEM_ADMIN llega a
// escribir la sesión.
// ============================================================================

use crate::models::{AccessToken, Credentials, LoginResponse};
use crate::services::{ApiError, AuthService, HttpTransport};
use crate::state::{LoginState, LoginStatus};
use crate::stores::SessionStore;
use crate::utils::KeyValueStorage;

pub const MISSING_FIELDS_MESSAGE: &str = "Email and password are required.";
pub const ACCESS_DENIED_MESSAGE: &str =
    "Access denied. Only SYSTEM_ADMIN users can access this panel.";
pub const MALFORMED_RESPONSE_MESSAGE: &str =
    "Authentication response malformed. Please try again later.";
pub const LOGIN_FALLBACK_MESSAGE: &str = "Authentication error. Check your credentials.";
pub const SESSION_SAVE_FAILED_MESSAGE: &str = "Could not save the session in this browser.";

/// Token + rol listos para `set_auth`, o el estado terminal de rechazo
pub fn evaluate_login_response(response: &LoginResponse) -> Result<(String, String), LoginStatus> {
    let token = match response.access_token() {
        Some(AccessToken::Primary(token)) => token,
        Some(AccessToken::Fallback(token)) => {
            log::warn!("⚠️ Token leído de tokens.accessToken (formato alternativo)");
            token
        }
        None => {
            log::error!("❌ Respuesta de login sin access token");
            return Err(LoginStatus::Failed(MALFORMED_RESPONSE_MESSAGE.to_string()));
        }
    };

    let Some(user) = response.user.as_ref() else {
        log::error!("❌ Respuesta de login sin usuario");
        return Err(LoginStatus::Failed(MALFORMED_RESPONSE_MESSAGE.to_string()));
    };

    if !user.is_system_admin() {
        log::warn!("🚫 Rol {:?} rechazado para {}", user.role, user.email);
        return Err(LoginStatus::RoleRejected(ACCESS_DENIED_MESSAGE.to_string()));
    }

    Ok((token, user.role.clone()))
}

fn failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Parse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
        other => other.user_message(LOGIN_FALLBACK_MESSAGE),
    }
}

pub struct LoginViewModel<T: HttpTransport, S: KeyValueStorage> {
    auth: AuthService<T, S>,
    session: SessionStore<S>,
    state: LoginState,
}

impl<T: HttpTransport, S: KeyValueStorage> Clone for LoginViewModel<T, S> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            session: self.session.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStorage> LoginViewModel<T, S> {
    pub fn new(auth: AuthService<T, S>, session: SessionStore<S>) -> Self {
        Self {
            auth,
            session,
            state: LoginState::new(),
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn status(&self) -> LoginStatus {
        self.state.get_status()
    }

    /// Envía el formulario. Mientras haya un envío en curso, otro envío
    /// devuelve `Submitting` sin llamar al backend.
    pub async fn submit(&self, credentials: Credentials) -> LoginStatus {
        if !self.state.begin_submit() {
            log::warn!("⏳ Login ya en curso, envío ignorado");
            return LoginStatus::Submitting;
        }

        let status = self.run(&credentials).await;
        self.state.set_status(status.clone());
        status
    }

    async fn run(&self, credentials: &Credentials) -> LoginStatus {
        if !credentials.is_complete() {
            return LoginStatus::Failed(MISSING_FIELDS_MESSAGE.to_string());
        }

        let response = match self.auth.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ Error en login: {}", e);
                return LoginStatus::Failed(failure_message(&e));
            }
        };

        let (token, role) = match evaluate_login_response(&response) {
            Ok(pair) => pair,
            Err(status) => return status,
        };

        match self.session.set_auth(&token, &role) {
            Ok(()) => {
                log::info!("✅ Login correcto: {}", credentials.email);
                LoginStatus::Success
            }
            Err(e) => {
                log::error!("❌ Error guardando sesión: {}", e);
                LoginStatus::Failed(SESSION_SAVE_FAILED_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnauthorizedPolicy;
    use crate::services::{ApiClient, HttpMethod};
    use crate::test_support::ScriptedTransport;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use rstest::rstest;
    use serde_json::{json, Value};
    use std::rc::Rc;

    const LOGIN_URL: &str = "http://auth.test/auth/login";

    struct Harness {
        vm: LoginViewModel<ScriptedTransport, MemoryStorage>,
        transport: Rc<ScriptedTransport>,
        session: SessionStore<MemoryStorage>,
    }

    fn harness() -> Harness {
        let transport = Rc::new(ScriptedTransport::new());
        let session = SessionStore::new(MemoryStorage::new());
        let client = ApiClient::new(
            "auth",
            "http://auth.test",
            Rc::clone(&transport),
            session.clone(),
            UnauthorizedPolicy::Ignore,
        );
        let vm = LoginViewModel::new(AuthService::new(client), session.clone());
        Harness { vm, transport, session }
    }

    fn admin_credentials() -> Credentials {
        Credentials::new("admin@x.com", "p")
    }

    #[test]
    fn admin_with_flat_token_establishes_session() {
        let h = harness();
        h.transport.respond(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            &json!({"access_token": "abc", "user": {"id": "1", "role": "SYSTEM_ADMIN"}}).to_string(),
        );

        let status = block_on(h.vm.submit(admin_credentials()));

        assert_eq!(status, LoginStatus::Success);
        assert_eq!(h.vm.status(), LoginStatus::Success);
        assert_eq!(h.session.get_token().as_deref(), Some("abc"));
        assert_eq!(h.session.get_role().as_deref(), Some("SYSTEM_ADMIN"));

        let sent: Value = serde_json::from_str(h.transport.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"email": "admin@x.com", "password": "p"}));
    }

    #[test]
    fn admin_with_nested_token_establishes_session() {
        let h = harness();
        h.transport.respond(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            &json!({"tokens": {"accessToken": "xyz"}, "user": {"role": "SYSTEM_ADMIN"}}).to_string(),
        );

        assert_eq!(block_on(h.vm.submit(admin_credentials())), LoginStatus::Success);
        assert_eq!(h.session.get_token().as_deref(), Some("xyz"));
    }

    #[rstest]
    #[case(json!({"access_token": "abc", "user": {"role": "WORKSHOP_ADMIN"}}))]
    #[case(json!({"tokens": {"accessToken": "xyz"}, "user": {"role": "WORKSHOP_ADMIN"}}))]
    #[case(json!({"access_token": "abc", "user": {"role": "VEHICLE_OWNER"}}))]
    #[case(json!({"access_token": "abc", "user": {"role": "system_admin"}}))]
    #[case(json!({"access_token": "abc", "user": {}}))]
    fn non_admin_roles_are_rejected_without_touching_session(#[case] body: Value) {
        let h = harness();
        h.session.set_auth("previous", "SYSTEM_ADMIN").unwrap();
        h.transport.respond(HttpMethod::Post, LOGIN_URL, 200, &body.to_string());

        let status = block_on(h.vm.submit(admin_credentials()));

        assert_eq!(status, LoginStatus::RoleRejected(ACCESS_DENIED_MESSAGE.to_string()));
        assert_eq!(h.session.get_token().as_deref(), Some("previous"));
        assert_eq!(h.session.get_role().as_deref(), Some("SYSTEM_ADMIN"));
    }

    #[rstest]
    #[case(json!({"user": {"role": "SYSTEM_ADMIN"}}))]
    #[case(json!({"access_token": "", "user": {"role": "SYSTEM_ADMIN"}}))]
    #[case(json!({"tokens": {}, "user": {"role": "SYSTEM_ADMIN"}}))]
    #[case(json!({"tokens": {"accessToken": null}, "user": {"role": "WORKSHOP_ADMIN"}}))]
    #[case(json!({"access_token": "abc"}))]
    fn malformed_responses_fail_without_writing(#[case] body: Value) {
        let h = harness();
        h.transport.respond(HttpMethod::Post, LOGIN_URL, 200, &body.to_string());

        let status = block_on(h.vm.submit(admin_credentials()));

        assert_eq!(status, LoginStatus::Failed(MALFORMED_RESPONSE_MESSAGE.to_string()));
        assert!(!h.session.is_authenticated());
        assert_eq!(h.session.get_role(), None);
    }

    #[test]
    fn non_json_body_is_malformed() {
        let h = harness();
        h.transport.respond(HttpMethod::Post, LOGIN_URL, 200, "<html></html>");
        assert_eq!(
            block_on(h.vm.submit(admin_credentials())),
            LoginStatus::Failed(MALFORMED_RESPONSE_MESSAGE.to_string())
        );
    }

    #[test]
    fn backend_error_message_is_surfaced() {
        let h = harness();
        h.transport.respond(HttpMethod::Post, LOGIN_URL, 401, r#"{"message":"Invalid credentials"}"#);

        let status = block_on(h.vm.submit(admin_credentials()));

        assert_eq!(status, LoginStatus::Failed("Invalid credentials".to_string()));
        assert!(!h.session.is_authenticated());
    }

    #[test]
    fn network_failure_uses_generic_message() {
        let h = harness();
        h.transport.fail(HttpMethod::Post, LOGIN_URL, ApiError::Network("offline".into()));

        let status = block_on(h.vm.submit(admin_credentials()));

        assert_eq!(status, LoginStatus::Failed(LOGIN_FALLBACK_MESSAGE.to_string()));
    }

    #[rstest]
    #[case("", "p")]
    #[case("admin@x.com", "")]
    #[case("   ", "   ")]
    fn incomplete_credentials_never_reach_the_backend(#[case] email: &str, #[case] password: &str) {
        let h = harness();

        let status = block_on(h.vm.submit(Credentials::new(email, password)));

        assert_eq!(status, LoginStatus::Failed(MISSING_FIELDS_MESSAGE.to_string()));
        assert!(h.transport.requests().is_empty());
    }

    #[test]
    fn double_submission_is_ignored_while_submitting() {
        let h = harness();
        h.transport.yield_before_reply(true);
        h.transport.respond(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            &json!({"access_token": "abc", "user": {"role": "SYSTEM_ADMIN"}}).to_string(),
        );

        let (first, second) = block_on(async {
            futures::join!(h.vm.submit(admin_credentials()), h.vm.submit(admin_credentials()))
        });

        assert_eq!(first, LoginStatus::Success);
        assert_eq!(second, LoginStatus::Submitting);
        assert_eq!(h.transport.count(HttpMethod::Post, LOGIN_URL), 1);
        assert_eq!(h.vm.status(), LoginStatus::Success);
    }

    #[test]
    fn can_retry_after_failure() {
        let h = harness();
        h.transport
            .respond(HttpMethod::Post, LOGIN_URL, 401, r#"{"message":"Invalid credentials"}"#)
            .respond(
                HttpMethod::Post,
                LOGIN_URL,
                200,
                &json!({"access_token": "abc", "user": {"role": "SYSTEM_ADMIN"}}).to_string(),
            );

        assert!(matches!(block_on(h.vm.submit(admin_credentials())), LoginStatus::Failed(_)));
        assert_eq!(block_on(h.vm.submit(admin_credentials())), LoginStatus::Success);
    }
}
