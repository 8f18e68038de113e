//! Unit test suite for artifact-pipeline
//!
//! Focused tests of the public library API that need no binary:
//! - **ordering**: topological order over descriptor-built graphs
//! - **filtering**: pattern filters applied through the orchestrator
//! - **errors**: user-facing error rendering
//!
//! ```bash
//! cargo test --test unit
//! ```

mod errors;
mod filtering;
mod ordering;
