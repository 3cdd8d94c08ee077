// ============================================================================
// DASHBOARD VIEWMODEL - listas de talleres + aprobar / rechazar
// ============================================================================
// Sin mutaciones optimistas: tras aprobar/rechazar se recargan ambas listas.
// ============================================================================

use crate::models::ModerationAction;
use crate::services::{HttpTransport, WorkshopService};
use crate::state::{DashboardState, WorkshopTab};
use crate::utils::KeyValueStorage;
use crate::viewmodels::UserDialogs;

pub const PENDING_LOAD_ERROR: &str = "Error loading pending workshops";
pub const ACTIVE_LOAD_ERROR: &str = "Error loading active workshops";
pub const APPROVE_ERROR: &str = "Error approving the workshop";
pub const REJECT_ERROR: &str = "Error rejecting the workshop";
pub const APPROVE_CONFIRM: &str = "Are you sure you want to approve this workshop?";
pub const REJECT_CONFIRM: &str = "Are you sure you want to reject this workshop?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOutcome {
    /// El usuario no confirmó; no hubo llamada
    Cancelled,
    Applied,
    Failed(String),
}

fn confirm_text(action: ModerationAction) -> &'static str {
    match action {
        ModerationAction::Approve => APPROVE_CONFIRM,
        ModerationAction::Reject => REJECT_CONFIRM,
    }
}

fn error_text(action: ModerationAction) -> &'static str {
    match action {
        ModerationAction::Approve => APPROVE_ERROR,
        ModerationAction::Reject => REJECT_ERROR,
    }
}

pub struct DashboardViewModel<T: HttpTransport, S: KeyValueStorage> {
    workshops: WorkshopService<T, S>,
    state: DashboardState,
}

impl<T: HttpTransport, S: KeyValueStorage> Clone for DashboardViewModel<T, S> {
    fn clone(&self) -> Self {
        Self {
            workshops: self.workshops.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStorage> DashboardViewModel<T, S> {
    pub fn new(workshops: WorkshopService<T, S>) -> Self {
        Self {
            workshops,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub async fn load_pending(&self) {
        self.state.start_loading(WorkshopTab::Pending);
        let result = self.workshops.list_pending().await.map_err(|e| {
            log::error!("❌ Error cargando pendientes: {}", e);
            e.user_message(PENDING_LOAD_ERROR)
        });
        self.state.finish_loading(WorkshopTab::Pending, result);
    }

    pub async fn load_active(&self) {
        self.state.start_loading(WorkshopTab::Active);
        let result = self.workshops.list_active().await.map_err(|e| {
            log::error!("❌ Error cargando activos: {}", e);
            e.user_message(ACTIVE_LOAD_ERROR)
        });
        self.state.finish_loading(WorkshopTab::Active, result);
    }

    /// Ambas cargas en paralelo; termina cuando terminan las dos
    pub async fn load_all(&self) {
        futures::join!(self.load_pending(), self.load_active());
    }

    pub async fn approve(&self, id: &str, dialogs: &dyn UserDialogs) -> ModerationOutcome {
        self.moderate(id, ModerationAction::Approve, dialogs).await
    }

    pub async fn reject(&self, id: &str, dialogs: &dyn UserDialogs) -> ModerationOutcome {
        self.moderate(id, ModerationAction::Reject, dialogs).await
    }

    async fn moderate(
        &self,
        id: &str,
        action: ModerationAction,
        dialogs: &dyn UserDialogs,
    ) -> ModerationOutcome {
        if !dialogs.confirm(confirm_text(action)) {
            log::info!("↩️ {} cancelado para taller {}", action.path_segment(), id);
            return ModerationOutcome::Cancelled;
        }

        match self.workshops.moderate(id, action).await {
            Ok(()) => {
                log::info!("✅ Taller {} ({}), recargando listas", id, action.path_segment());
                self.load_all().await;
                ModerationOutcome::Applied
            }
            Err(e) => {
                log::error!("❌ Error en {} de taller {}: {}", action.path_segment(), id, e);
                let message = e.user_message(error_text(action));
                dialogs.alert(&message);
                ModerationOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnauthorizedPolicy;
    use crate::services::{ApiClient, ApiError, HttpMethod};
    use crate::stores::SessionStore;
    use crate::test_support::{RecordingDialogs, ScriptedTransport};
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use rstest::rstest;
    use std::rc::Rc;

    const BASE: &str = "http://workshops.test/workshops";
    const PENDING: &str = "http://workshops.test/workshops/admin/pending";

    fn dashboard() -> (DashboardViewModel<ScriptedTransport, MemoryStorage>, Rc<ScriptedTransport>) {
        let transport = Rc::new(ScriptedTransport::new());
        let client = ApiClient::new(
            "workshops",
            BASE,
            Rc::clone(&transport),
            SessionStore::new(MemoryStorage::new()),
            UnauthorizedPolicy::Ignore,
        );
        (DashboardViewModel::new(WorkshopService::new(client)), transport)
    }

    fn script_lists(transport: &ScriptedTransport) {
        transport.respond(
            HttpMethod::Get,
            PENDING,
            200,
            r#"[{"id":"42","isApproved":false},{"id":"43","isApproved":false}]"#,
        );
        transport.respond(
            HttpMethod::Get,
            BASE,
            200,
            r#"{"workshops":[{"id":"1","isApproved":true},{"id":"42","isApproved":false}]}"#,
        );
    }

    #[test]
    fn load_all_fills_both_lists() {
        let (vm, transport) = dashboard();
        script_lists(&transport);

        block_on(vm.load_all());

        let state = vm.state();
        assert_eq!(state.pending_count(), 2);
        assert_eq!(state.active_count(), 1);
        assert!(!state.pending.borrow().loading);
        assert!(!state.active.borrow().loading);
    }

    #[test]
    fn one_failing_list_does_not_block_the_other() {
        let (vm, transport) = dashboard();
        transport.respond(HttpMethod::Get, PENDING, 500, "");
        transport.respond(HttpMethod::Get, BASE, 200, r#"[{"id":"1","isApproved":true}]"#);

        block_on(vm.load_all());

        let state = vm.state();
        assert_eq!(state.pending.borrow().error.as_deref(), Some(PENDING_LOAD_ERROR));
        assert_eq!(state.active.borrow().error, None);
        assert_eq!(state.active_count(), 1);
    }

    #[test]
    fn plain_text_list_body_is_an_empty_list_without_error() {
        let (vm, transport) = dashboard();
        transport.respond(HttpMethod::Get, PENDING, 200, "OK");

        block_on(vm.load_pending());

        let pending = vm.state().pending.borrow();
        assert!(pending.workshops.is_empty());
        assert_eq!(pending.error, None);
    }

    #[test]
    fn numeric_ids_are_listed() {
        let (vm, transport) = dashboard();
        transport.respond(
            HttpMethod::Get,
            PENDING,
            200,
            r#"{"items":[{"id":1,"name":"a"},{"id":2,"name":"b"}]}"#,
        );

        block_on(vm.load_pending());

        assert_eq!(vm.state().pending_count(), 2);
        assert_eq!(vm.state().pending.borrow().error, None);
    }

    #[test]
    fn list_error_prefers_backend_message() {
        let (vm, transport) = dashboard();
        transport.respond(HttpMethod::Get, BASE, 403, r#"{"message":"Forbidden resource"}"#);

        block_on(vm.load_active());

        assert_eq!(vm.state().active.borrow().error.as_deref(), Some("Forbidden resource"));
    }

    #[test]
    fn loads_run_concurrently() {
        let (vm, transport) = dashboard();
        script_lists(&transport);
        transport.yield_before_reply(true);

        let observed = block_on(async {
            let load = vm.load_all();
            futures::pin_mut!(load);
            // Primer poll: ambas cargas han salido antes de que responda ninguna
            let _ = futures::poll!(load.as_mut());
            let in_flight = (
                vm.state().pending.borrow().loading,
                vm.state().active.borrow().loading,
                transport.requests().len(),
            );
            load.await;
            in_flight
        });

        assert_eq!(observed, (true, true, 2));
        assert!(!vm.state().pending.borrow().loading);
    }

    #[rstest]
    #[case(ModerationAction::Approve, "http://workshops.test/workshops/42/approve")]
    #[case(ModerationAction::Reject, "http://workshops.test/workshops/42/reject")]
    fn confirmed_moderation_patches_once_then_reloads_each_list_once(
        #[case] action: ModerationAction,
        #[case] url: &str,
    ) {
        let (vm, transport) = dashboard();
        script_lists(&transport);
        transport.respond(HttpMethod::Patch, url, 200, "");
        let dialogs = RecordingDialogs::answering(true);

        let outcome = block_on(async {
            match action {
                ModerationAction::Approve => vm.approve("42", &dialogs).await,
                ModerationAction::Reject => vm.reject("42", &dialogs).await,
            }
        });

        assert_eq!(outcome, ModerationOutcome::Applied);
        assert_eq!(transport.count(HttpMethod::Patch, url), 1);
        assert_eq!(transport.count(HttpMethod::Get, PENDING), 1);
        assert_eq!(transport.count(HttpMethod::Get, BASE), 1);
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.requests()[0].method, HttpMethod::Patch);
        assert_eq!(dialogs.confirms().len(), 1);
        assert!(dialogs.alerts().is_empty());
    }

    #[test]
    fn cancelled_confirmation_issues_no_calls() {
        let (vm, transport) = dashboard();
        let dialogs = RecordingDialogs::answering(false);

        let outcome = block_on(vm.reject("42", &dialogs));

        assert_eq!(outcome, ModerationOutcome::Cancelled);
        assert!(transport.requests().is_empty());
        assert_eq!(dialogs.confirms(), vec![REJECT_CONFIRM.to_string()]);
    }

    #[test]
    fn failed_moderation_alerts_and_keeps_state() {
        let (vm, transport) = dashboard();
        script_lists(&transport);
        block_on(vm.load_all());
        let before = vm.state().snapshot();
        transport.clear_requests();
        transport.respond(
            HttpMethod::Patch,
            "http://workshops.test/workshops/42/approve",
            409,
            r#"{"message":"Workshop already approved"}"#,
        );
        let dialogs = RecordingDialogs::answering(true);

        let outcome = block_on(vm.approve("42", &dialogs));

        assert_eq!(outcome, ModerationOutcome::Failed("Workshop already approved".to_string()));
        assert_eq!(dialogs.alerts(), vec!["Workshop already approved".to_string()]);
        assert_eq!(vm.state().snapshot(), before);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn network_failure_on_reject_uses_fallback_alert() {
        let (vm, transport) = dashboard();
        transport.fail(
            HttpMethod::Patch,
            "http://workshops.test/workshops/9/reject",
            ApiError::Network("offline".into()),
        );
        let dialogs = RecordingDialogs::answering(true);

        let outcome = block_on(vm.reject("9", &dialogs));

        assert_eq!(outcome, ModerationOutcome::Failed(REJECT_ERROR.to_string()));
        assert_eq!(dialogs.alerts(), vec![REJECT_ERROR.to_string()]);
    }
}
