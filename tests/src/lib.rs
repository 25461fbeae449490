//! # Testament-Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-component scenarios
//!     ├── lifecycle.rs  # Happy paths through the full state machine
//!     └── adversarial.rs# Impostors, races, stuck distributions
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p testament-tests
//!
//! # By category
//! cargo test -p testament-tests integration::lifecycle
//! cargo test -p testament-tests integration::adversarial
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install the test tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to warnings only so assertion failures stay
/// readable.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
