// ============================================================================
// BINDINGS WASM - superficie que consume la vista en JavaScript
// ============================================================================

use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::app::{App, Route};
use crate::config::CONFIG;
use crate::models::Credentials;
use crate::services::GlooTransport;
use crate::state::{LoginStatus, WorkshopTab};
use crate::utils::LocalStorage;
use crate::viewmodels::{BrowserDialogs, ModerationOutcome};

type BrowserApp = App<GlooTransport, LocalStorage>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Workshop Admin Panel ({})", CONFIG.environment);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    status: &'static str,
    error: Option<String>,
    route: Route,
}

impl LoginResult {
    fn new(status: &LoginStatus, route: Route) -> Self {
        let label = match status {
            LoginStatus::Idle => "idle",
            LoginStatus::Submitting => "submitting",
            LoginStatus::Success => "success",
            LoginStatus::RoleRejected(_) => "roleRejected",
            LoginStatus::Failed(_) => "failed",
        };
        Self {
            status: label,
            error: status.error_message().map(str::to_string),
            route,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModerationResult {
    outcome: &'static str,
    error: Option<String>,
}

impl From<ModerationOutcome> for ModerationResult {
    fn from(outcome: ModerationOutcome) -> Self {
        match outcome {
            ModerationOutcome::Cancelled => Self { outcome: "cancelled", error: None },
            ModerationOutcome::Applied => Self { outcome: "applied", error: None },
            ModerationOutcome::Failed(message) => Self {
                outcome: "failed",
                error: Some(message),
            },
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn parse_tab(tab: &str) -> Result<WorkshopTab, JsValue> {
    match tab {
        "pending" => Ok(WorkshopTab::Pending),
        "active" => Ok(WorkshopTab::Active),
        other => Err(JsValue::from_str(&format!("Unknown tab: {}", other))),
    }
}

fn route_name(route: Route) -> String {
    match route {
        Route::Login => "login".to_string(),
        Route::Dashboard => "dashboard".to_string(),
    }
}

/// Panel administrativo para la vista JS
#[wasm_bindgen]
pub struct AdminPanel {
    app: BrowserApp,
}

#[wasm_bindgen]
impl AdminPanel {
    #[wasm_bindgen(constructor)]
    pub fn new() -> AdminPanel {
        AdminPanel {
            app: App::new(&CONFIG, LocalStorage, GlooTransport),
        }
    }

    #[wasm_bindgen(js_name = currentRoute)]
    pub fn current_route(&self) -> String {
        route_name(self.app.current_route())
    }

    /// Resuelve a `{ status, error, route }`
    pub fn login(&self, email: String, password: String) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let status = app.login(Credentials::new(email, password)).await;
            to_js(&LoginResult::new(&status, app.current_route()))
        })
    }

    /// Carga ambas listas y resuelve al estado del dashboard
    #[wasm_bindgen(js_name = loadDashboard)]
    pub fn load_dashboard(&self) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            app.enter_dashboard().await;
            to_js(&app.dashboard_view().state().snapshot())
        })
    }

    #[wasm_bindgen(js_name = approveWorkshop)]
    pub fn approve_workshop(&self, id: String) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let outcome = app.approve(&id, &BrowserDialogs).await;
            to_js(&ModerationResult::from(outcome))
        })
    }

    #[wasm_bindgen(js_name = rejectWorkshop)]
    pub fn reject_workshop(&self, id: String) -> Promise {
        let app = self.app.clone();
        future_to_promise(async move {
            let outcome = app.reject(&id, &BrowserDialogs).await;
            to_js(&ModerationResult::from(outcome))
        })
    }

    #[wasm_bindgen(js_name = dashboardState)]
    pub fn dashboard_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.app.dashboard_view().state().snapshot())
    }

    #[wasm_bindgen(js_name = selectTab)]
    pub fn select_tab(&self, tab: &str) -> Result<(), JsValue> {
        self.app.dashboard_view().state().select_tab(parse_tab(tab)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = dismissError)]
    pub fn dismiss_error(&self, tab: &str) -> Result<(), JsValue> {
        self.app.dashboard_view().state().dismiss_error(parse_tab(tab)?);
        Ok(())
    }

    /// Devuelve la ruta destino ("login")
    pub fn logout(&self) -> String {
        route_name(self.app.logout())
    }
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self::new()
    }
}
