// ============================================================================
// WORKSHOP ADMIN PANEL - núcleo de sesión y flujos (RUST + WASM)
// ============================================================================
// - Stores: sesión persistida (token + rol)
// - Services: SOLO comunicación API (pipeline autenticado)
// - State: State Management con Rc<RefCell>
// - ViewModels: login y dashboard
// - Models: estructuras compartidas con los backends
// La vista (HTML/CSS) vive fuera de este crate y consume `AdminPanel`.
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;
pub mod utils;
pub mod viewmodels;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use app::{App, Route};
pub use config::{AppConfig, UnauthorizedPolicy, CONFIG};

#[cfg(target_arch = "wasm32")]
mod bindings;

#[cfg(target_arch = "wasm32")]
pub use bindings::AdminPanel;
