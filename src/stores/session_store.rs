// ============================================================================
// SESSION STORE - token + rol persistidos
// ============================================================================
// Sin estado en memoria: cada lectura va al storage, así un reload de la
// página (o cualquier otro componente) ve siempre lo mismo.
// ============================================================================

use std::rc::Rc;

use crate::utils::{KeyValueStorage, StorageError, STORAGE_KEY_ROLE, STORAGE_KEY_TOKEN, SYSTEM_ADMIN_ROLE};

pub struct SessionStore<S: KeyValueStorage> {
    storage: Rc<S>,
}

// Clone manual: no exige `S: Clone`, solo comparte el Rc
impl<S: KeyValueStorage> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Rc::clone(&self.storage),
        }
    }
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::from_shared(Rc::new(storage))
    }

    pub fn from_shared(storage: Rc<S>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Guarda token y rol como una unidad.
    ///
    /// El token se escribe antes que el rol: quien vea un rol ve también su
    /// token. Si el rol falla se borra el token para no dejar media sesión.
    pub fn set_auth(&self, token: &str, role: &str) -> Result<(), StorageError> {
        self.storage.set(STORAGE_KEY_TOKEN, token)?;
        if let Err(e) = self.storage.set(STORAGE_KEY_ROLE, role) {
            let _ = self.storage.remove(STORAGE_KEY_TOKEN);
            return Err(e);
        }
        log::info!("💾 Sesión guardada (rol: {})", role);
        Ok(())
    }

    pub fn get_token(&self) -> Option<String> {
        self.storage.get(STORAGE_KEY_TOKEN)
    }

    pub fn get_role(&self) -> Option<String> {
        self.storage.get(STORAGE_KEY_ROLE)
    }

    /// Borra ambas claves. Se intentan las dos aunque la primera falle
    pub fn clear_auth(&self) -> Result<(), StorageError> {
        let role = self.storage.remove(STORAGE_KEY_ROLE);
        let token = self.storage.remove(STORAGE_KEY_TOKEN);
        log::info!("🗑️ Sesión eliminada");
        role.and(token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    pub fn is_system_admin(&self) -> bool {
        self.get_role().as_deref() == Some(SYSTEM_ADMIN_ROLE)
    }
}
