//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters connect the inheritance subsystem to external systems.
//!
//! - Adapters implement the outbound ports
//! - The in-memory implementations here double as test fakes; production
//!   adapters would sit on the host ledger's table engine and token engine

pub mod bank;
pub mod tables;

pub use bank::*;
pub use tables::*;
