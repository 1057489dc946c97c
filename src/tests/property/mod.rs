//! Property-based tests
//!
//! Invariants checked with proptest rather than single examples.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `prompt_props`: prompt construction
//!   - Context never exceeds its character budget
//!   - Context is a prefix of the document text
//!   - Question appears verbatim
//!
//! - `document_props`: the extracted document model
//!   - Pages ordered by number
//!   - One label per page, in order
//!   - Character count agrees with the assembled text
//!
//! Case count is configurable through `PROPTEST_CASES`.

mod document_props;
mod prompt_props;
