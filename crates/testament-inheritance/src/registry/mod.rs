//! # Registries
//!
//! The three record owners: heirs (share data), authorities
//! (reputation/pledge), testators (lifecycle status and attachment).
//! Each is a thin rule-enforcing layer over one external ledger table;
//! none holds state of its own. The state machine composes them and is
//! the only caller of their mutating operations.

pub mod authorities;
pub mod heirs;
pub mod testators;

pub use authorities::AuthorityRegistry;
pub use heirs::HeirRegistry;
pub use testators::TestatorRegistry;
