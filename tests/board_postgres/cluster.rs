//! Embedded `PostgreSQL` cluster access for board integration tests.

use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestCluster, detect_execution_privileges};
use rstest::fixture;
use std::sync::Once;

const WORKER_VAR: &str = "PG_EMBEDDED_WORKER";

static WORKER_EXPORT: Once = Once::new();

/// Points the cluster bootstrap at this crate's `pg_worker` binary.
///
/// Only root needs the worker; unprivileged runs start `PostgreSQL` in
/// process. An explicit `PG_EMBEDDED_WORKER` is left alone.
fn export_worker_path() {
    WORKER_EXPORT.call_once(|| {
        let is_root = matches!(detect_execution_privileges(), ExecutionPrivileges::Root);
        if !is_root || std::env::var_os(WORKER_VAR).is_some() {
            return;
        }
        // SAFETY: runs once, before the shared cluster reads its environment.
        unsafe {
            std::env::set_var(WORKER_VAR, env!("CARGO_BIN_EXE_pg_worker"));
        }
    });
}

/// Shared embedded cluster, bootstrapped on first use.
#[fixture]
pub fn board_cluster() -> &'static TestCluster {
    export_worker_path();
    shared_test_cluster()
}
