use serde_json::Value;

use crate::store::StoreError;

/// Caller-supplied validation hook, run in addition to the built-in shape
/// check before every save.
pub type Validator = dyn Fn(&Value) -> bool + Send + Sync;

/// Shapes the store will persist: objects, arrays, and null.
pub(crate) fn is_settings_shape(value: &Value) -> bool {
    value.is_object() || value.is_array() || value.is_null()
}

/// Run the custom validator (if any), then the shape check. Both must pass;
/// a shape failure wins when both reject.
pub fn settings_are_valid(value: &Value, custom: Option<&Validator>) -> Result<(), StoreError> {
    let custom_ok = custom.map_or(true, |f| f(value));
    if !is_settings_shape(value) {
        return Err(StoreError::PayloadNotObject);
    }
    if !custom_ok {
        return Err(StoreError::ValidationRejected);
    }
    Ok(())
}
