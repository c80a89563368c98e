//! Device PIN extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the device PIN.
pub const DEVICE_PIN_HEADER: &str = "x-device-pin";

/// Proof that the request passed the device lock.
///
/// Add it as a parameter to any handler that wipes or replaces data:
///
/// ```ignore
/// async fn reset(_unlocked: DeviceUnlocked, State(state): State<AppState>) -> AppResult<StatusCode> {
///     ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeviceUnlocked;

impl FromRequestParts<AppState> for DeviceUnlocked {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(DEVICE_PIN_HEADER)
            .and_then(|v| v.to_str().ok());

        state.device_lock.verify(presented).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), "Device lock rejected request");
            AppError::Core(e)
        })?;
        Ok(DeviceUnlocked)
    }
}
