// ============================================================================
// LOGIN STATE - Idle → Submitting → {Success, RoleRejected, Failed}
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    /// Credenciales válidas pero rol distinto de SYSTEM_ADMIN
    RoleRejected(String),
    Failed(String),
}

impl LoginStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, LoginStatus::Submitting)
    }

    /// Mensaje a mostrar inline en el formulario
    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoginStatus::RoleRejected(message) | LoginStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Estado del formulario de login
#[derive(Clone, Default)]
pub struct LoginState {
    pub status: Rc<RefCell<LoginStatus>>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_status(&self) -> LoginStatus {
        self.status.borrow().clone()
    }

    pub fn set_status(&self, status: LoginStatus) {
        *self.status.borrow_mut() = status;
    }

    /// Pasa a `Submitting` salvo que ya lo esté. Devuelve si lo consiguió
    pub fn begin_submit(&self) -> bool {
        let mut status = self.status.borrow_mut();
        if status.is_submitting() {
            return false;
        }
        *status = LoginStatus::Submitting;
        true
    }

    pub fn reset(&self) {
        self.set_status(LoginStatus::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_submit_guards_double_submission() {
        let state = LoginState::new();
        assert!(state.begin_submit());
        assert!(!state.begin_submit());
        assert_eq!(state.get_status(), LoginStatus::Submitting);

        state.set_status(LoginStatus::Failed("x".into()));
        assert!(state.begin_submit());
    }

    #[test]
    fn error_message_only_for_terminal_failures() {
        assert_eq!(LoginStatus::Idle.error_message(), None);
        assert_eq!(LoginStatus::Success.error_message(), None);
        assert_eq!(LoginStatus::RoleRejected("denied".into()).error_message(), Some("denied"));
        assert_eq!(LoginStatus::Failed("bad".into()).error_message(), Some("bad"));
    }
}
