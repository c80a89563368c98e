//! Request extractors guarding destructive operations.
//!
//! - [`device_lock::DeviceUnlocked`] -- Requires the device PIN in the
//!   `X-Device-Pin` header when one is configured.

pub mod device_lock;
