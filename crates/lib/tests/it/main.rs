/*! Integration tests for Pathindex.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - element: Tests for ids, paths and element kinds
 * - backend: Tests for the PathIndexStore trait and implementations
 * - index: Tests for hint computation, updates, lookup, splitting and export
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("pathindex=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}
