// ============================================================================
// VIEWMODELS - lógica de los flujos (login, dashboard)
// ============================================================================

pub mod dialogs;
pub mod login_viewmodel;
pub mod dashboard_viewmodel;

pub use dialogs::UserDialogs;
pub use login_viewmodel::LoginViewModel;
pub use dashboard_viewmodel::{DashboardViewModel, ModerationOutcome};

#[cfg(target_arch = "wasm32")]
pub use dialogs::BrowserDialogs;
