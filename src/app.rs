// ============================================================================
// APP - composición de store, clientes y viewmodels + routing
// ============================================================================

use std::rc::Rc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::models::Credentials;
use crate::services::{ApiClient, AuthService, HttpTransport, WorkshopService};
use crate::state::LoginStatus;
use crate::stores::SessionStore;
use crate::utils::KeyValueStorage;
use crate::viewmodels::{DashboardViewModel, LoginViewModel, ModerationOutcome, UserDialogs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Dashboard,
}

pub struct App<T: HttpTransport, S: KeyValueStorage> {
    transport: Rc<T>,
    session: SessionStore<S>,
    login: LoginViewModel<T, S>,
    dashboard: DashboardViewModel<T, S>,
}

impl<T: HttpTransport, S: KeyValueStorage> Clone for App<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            session: self.session.clone(),
            login: self.login.clone(),
            dashboard: self.dashboard.clone(),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStorage> App<T, S> {
    /// Un pipeline por backend, ambos con la misma política de 401
    pub fn new(config: &AppConfig, storage: S, transport: T) -> Self {
        let transport = Rc::new(transport);
        let session = SessionStore::new(storage);

        let auth_client = ApiClient::new(
            "auth",
            config.auth_base_url.clone(),
            Rc::clone(&transport),
            session.clone(),
            config.unauthorized_policy,
        );
        let workshop_client = ApiClient::new(
            "workshops",
            config.workshop_base_url.clone(),
            Rc::clone(&transport),
            session.clone(),
            config.unauthorized_policy,
        );

        Self {
            transport,
            login: LoginViewModel::new(AuthService::new(auth_client), session.clone()),
            dashboard: DashboardViewModel::new(WorkshopService::new(workshop_client)),
            session,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn login_view(&self) -> &LoginViewModel<T, S> {
        &self.login
    }

    pub fn dashboard_view(&self) -> &DashboardViewModel<T, S> {
        &self.dashboard
    }

    /// Dashboard solo con token y rol SYSTEM_ADMIN guardados
    pub fn current_route(&self) -> Route {
        if self.session.is_authenticated() && self.session.is_system_admin() {
            Route::Dashboard
        } else {
            Route::Login
        }
    }

    pub async fn login(&self, credentials: Credentials) -> LoginStatus {
        self.login.submit(credentials).await
    }

    /// Entrada al dashboard: carga ambas listas si la ruta lo permite
    pub async fn enter_dashboard(&self) -> Route {
        let route = self.current_route();
        if route == Route::Dashboard {
            self.dashboard.load_all().await;
        } else {
            log::warn!("🔒 Dashboard sin sesión de administrador, redirigiendo a login");
        }
        route
    }

    pub async fn approve(&self, id: &str, dialogs: &dyn UserDialogs) -> ModerationOutcome {
        self.dashboard.approve(id, dialogs).await
    }

    pub async fn reject(&self, id: &str, dialogs: &dyn UserDialogs) -> ModerationOutcome {
        self.dashboard.reject(id, dialogs).await
    }

    pub fn logout(&self) -> Route {
        log::info!("👋 Logout");
        if let Err(e) = self.session.clear_auth() {
            log::error!("❌ Error limpiando sesión: {}", e);
        }
        self.dashboard.state().clear();
        self.login.state().reset();
        Route::Login
    }
}
