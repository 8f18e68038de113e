//! Integration test suite for artifact-pipeline
//!
//! End-to-end tests over temporary projects and filesystem repositories:
//! - **pipeline**: library-level runs with the descriptor builder and repository resolver
//! - **cli**: the `artpipe` binary
//!
//! ```bash
//! cargo test --test integration
//! ```

mod cli;
mod pipeline;
