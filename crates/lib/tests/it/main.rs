/*! Integration tests for dataview.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - query: Tests for DataQuery construction, composition and the query! macro
 * - view: Tests for DataContainer, DataView and DataViewMut (resolution, mutation, traversal, serializable types)
 * - value: Tests for the mutable/immutable Value family (plain, map, optional and bounded values)
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("dataview=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod query;
mod view;
