use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// Shallow-merge `patch` over `record`, skipping the `immutable` keys.
///
/// The merged object is deserialized back into `T`, so a supplied field with
/// the wrong type (or an unknown enum value) is a validation error.
pub(crate) fn merge<T>(
    record: &T,
    patch: &Map<String, Value>,
    immutable: &[&str],
    entity: &str,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(record)
        .map_err(|e| StoreError::validation(format!("Invalid {entity}: {e}")))?;
    let fields = value
        .as_object_mut()
        .ok_or_else(|| StoreError::validation(format!("Invalid {entity}: not an object")))?;

    for (key, new_value) in patch {
        if immutable.contains(&key.as_str()) {
            tracing::debug!(field = %key, "Ignoring immutable field in {} update", entity);
            continue;
        }
        fields.insert(key.clone(), new_value.clone());
    }

    serde_json::from_value(value)
        .map_err(|e| StoreError::validation(format!("Invalid {entity} update: {e}")))
}
