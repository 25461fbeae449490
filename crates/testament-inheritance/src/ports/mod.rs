//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the inheritance subsystem.
//! These are the interfaces between the domain and the outside world.
//!
//! - **Driving Ports (Inbound)**: `InheritanceApi`
//! - **Driven Ports (Outbound)**: `HeirTable`, `AuthorityTable`,
//!   `TestatorTable`, `TransferCapability`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
