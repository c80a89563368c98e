use agenda_core::error::CoreError;

use super::password::{hash_password, verify_password};

/// Holds the hashed device PIN, if one is configured.
///
/// With no PIN the lock is open and every request passes.
#[derive(Debug, Clone, Default)]
pub struct DeviceLock {
    pin_hash: Option<String>,
}

impl DeviceLock {
    /// A lock that lets everything through.
    pub fn open() -> Self {
        Self::default()
    }

    /// Hash `pin` and require it from now on.
    pub fn with_pin(pin: &str) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            pin_hash: Some(hash_password(pin)?),
        })
    }

    pub fn is_open(&self) -> bool {
        self.pin_hash.is_none()
    }

    /// Check a presented PIN. Missing or wrong PINs are `Forbidden`.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), CoreError> {
        let Some(hash) = &self.pin_hash else {
            return Ok(());
        };
        let presented =
            presented.ok_or_else(|| CoreError::Forbidden("Device PIN required".into()))?;
        match verify_password(presented.trim(), hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CoreError::Forbidden("Incorrect device PIN".into())),
            Err(e) => Err(CoreError::Internal(format!("Device PIN check failed: {e}"))),
        }
    }
}
