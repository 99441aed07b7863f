pub mod builders;
pub mod fake_backend;
pub mod repository;

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Shell script standing in for `java`.
///
/// It skips JVM options, the classpath and the main class, then runs the
/// remaining (tool) arguments as a `/bin/sh` command line. Run it as
/// `/bin/sh <script> ...` by configuring `java = "/bin/sh"` and passing the
/// script path as the first JVM argument.
const FAKE_JAVA: &str = r#"#!/bin/sh
while [ "$#" -gt 0 ]; do
  case "$1" in
    -classpath|-cp) shift 2 ;;
    -*) shift ;;
    *) shift; break ;;
  esac
done
exec /bin/sh -c "$*"
"#;

/// Write the fake `java` script into `dir` and return its path.
pub fn write_fake_java(dir: &Path) -> PathBuf {
    let path = dir.join("fake-java.sh");
    std::fs::write(&path, FAKE_JAVA).expect("writing fake java script");
    path
}
