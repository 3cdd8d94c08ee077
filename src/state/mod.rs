// ============================================================================
// STATE MODULE - State Management con Rc<RefCell>
// ============================================================================

pub mod login_state;
pub mod dashboard_state;

pub use login_state::*;
pub use dashboard_state::*;
