//! Device lock: the PIN that guards restore and factory reset.

pub mod device_lock;
pub mod password;
