//! Test utilities shared by unit and integration tests.
//!
//! Available under `#[cfg(test)]` and with the `test-utils` feature, which the
//! crate's own dev-dependency enables for the `tests/` targets.
//!
//! - [`init_test_logging`]: one-time tracing setup
//! - [`fixtures`]: descriptor text and on-disk project/repository layouts
//! - [`doubles`]: recording and scripted pipeline collaborators

pub mod doubles;
pub mod fixtures;

pub use doubles::{RecordingProcessor, ScriptedResolver};
pub use fixtures::{ManifestFixture, RepositoryFixture, TestProject};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays
/// off.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// artifact_pipeline::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
