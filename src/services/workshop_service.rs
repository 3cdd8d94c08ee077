// ============================================================================
// WORKSHOP SERVICE - registry de talleres
// ============================================================================

use crate::models::{ModerationAction, Workshop};
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::services::http::HttpTransport;
use crate::utils::{extract_records, KeyValueStorage, ALL_WORKSHOPS_PATH, PENDING_WORKSHOPS_PATH};

pub struct WorkshopService<T: HttpTransport, S: KeyValueStorage> {
    client: ApiClient<T, S>,
}

impl<T: HttpTransport, S: KeyValueStorage> Clone for WorkshopService<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport, S: KeyValueStorage> WorkshopService<T, S> {
    pub fn new(client: ApiClient<T, S>) -> Self {
        Self { client }
    }

    /// Talleres pendientes de aprobación
    pub async fn list_pending(&self) -> Result<Vec<Workshop>, ApiError> {
        let raw = self.client.get_json(PENDING_WORKSHOPS_PATH).await?;
        log::debug!("📦 Pendientes (raw): {:?}", raw);
        let workshops: Vec<Workshop> = extract_records(raw.as_ref());
        log::info!("📋 {} talleres pendientes", workshops.len());
        Ok(workshops)
    }

    /// Talleres activos: colección completa filtrada por `isApproved`
    pub async fn list_active(&self) -> Result<Vec<Workshop>, ApiError> {
        let raw = self.client.get_json(ALL_WORKSHOPS_PATH).await?;
        log::debug!("📦 Activos (raw): {:?}", raw);
        let workshops: Vec<Workshop> = extract_records::<Workshop>(raw.as_ref())
            .into_iter()
            .filter(|w| w.is_approved)
            .collect();
        log::info!("📋 {} talleres activos", workshops.len());
        Ok(workshops)
    }

    /// `PATCH /{id}/approve` o `PATCH /{id}/reject`; el id va codificado
    pub async fn moderate(&self, id: &str, action: ModerationAction) -> Result<(), ApiError> {
        let path = format!("/{}/{}", urlencoding::encode(id), action.path_segment());
        log::info!("📝 {} taller {}", action.path_segment(), id);
        self.client.patch(&path).await
    }

    pub async fn approve(&self, id: &str) -> Result<(), ApiError> {
        self.moderate(id, ModerationAction::Approve).await
    }

    pub async fn reject(&self, id: &str) -> Result<(), ApiError> {
        self.moderate(id, ModerationAction::Reject).await
    }
}
