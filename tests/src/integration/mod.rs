//! Cross-component scenarios exercising the whole subsystem through its
//! public API, over the in-memory adapters.

pub mod adversarial;
pub mod lifecycle;
