//! Common Test Utilities
//!
//! Shared PDF fixtures. PDFs are built with lopdf so the cross-reference
//! table is always valid.


pub use fixtures::*;
