// ============================================================================
// NORMALIZACIÓN DE RESPUESTAS - listas con forma variable
// ============================================================================
// El registry de talleres devuelve a veces un array directo y a veces un
// objeto que envuelve el array. Todo se reduce a una lista ordenada.
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Claves envoltorio reconocidas, en orden de prioridad
pub const WRAPPER_KEYS: [&str; 3] = ["data", "workshops", "items"];

/// Forma detectada de una respuesta de lista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[ ... ]`
    BareArray,
    /// `{ "<key>": [ ... ] }` con `key` en `WRAPPER_KEYS`
    Wrapped(&'static str),
    /// Cualquier otra cosa (null, escalar, objeto sin clave conocida)
    Unrecognized,
}

impl ResponseShape {
    pub fn detect(value: &Value) -> Self {
        if value.is_array() {
            return ResponseShape::BareArray;
        }
        WRAPPER_KEYS
            .iter()
            .find(|key| value.get(**key).is_some_and(Value::is_array))
            .map(|key| ResponseShape::Wrapped(*key))
            .unwrap_or(ResponseShape::Unrecognized)
    }
}

/// Devuelve la secuencia interna, o vacía si la forma no se reconoce.
///
/// `None` representa un body ausente (equivalente a `undefined`).
pub fn extract_array_from_response(value: Option<&Value>) -> Vec<Value> {
    let Some(value) = value else {
        return Vec::new();
    };

    match ResponseShape::detect(value) {
        ResponseShape::BareArray => value.as_array().cloned().unwrap_or_default(),
        ResponseShape::Wrapped(key) => value
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        ResponseShape::Unrecognized => {
            log::warn!("⚠️ Respuesta con forma no reconocida, se usa lista vacía");
            Vec::new()
        }
    }
}

/// Normaliza y deserializa cada elemento.
///
/// Solo se descartan los elementos que `T` no puede representar en absoluto
/// (p. ej. un escalar donde se espera un objeto).
pub fn extract_records<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    extract_array_from_response(value)
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("⚠️ Elemento {} descartado: {}", index, e);
                None
            }
        })
        .collect()
}
