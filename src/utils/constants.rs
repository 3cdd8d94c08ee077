/// Clave de localStorage con el access token
pub const STORAGE_KEY_TOKEN: &str = "token";

/// Clave de localStorage con el rol del usuario logueado
pub const STORAGE_KEY_ROLE: &str = "role";

/// Único rol autorizado a abrir sesión en el panel
pub const SYSTEM_ADMIN_ROLE: &str = "SYSTEM_ADMIN";

pub const LOGIN_PATH: &str = "/auth/login";
pub const PENDING_WORKSHOPS_PATH: &str = "/admin/pending";
/// Ruta vacía: la base URL ya termina en `/workshops`
pub const ALL_WORKSHOPS_PATH: &str = "";
