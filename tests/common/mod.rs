//! Golden-file comparison for rendered bit strings

use std::fs;
use std::path::PathBuf;

const REGENERATE: &str = "FENWICK_BITS_UPDATE_SNAPSHOTS";

/// Compare `actual` with `tests/snapshots/<name>`, or rewrite the file
/// when `FENWICK_BITS_UPDATE_SNAPSHOTS` is set.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "snapshots", name]
        .iter()
        .collect();
    if std::env::var_os(REGENERATE).is_some() {
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("reading {}: {}", path.display(), err));
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    assert_eq!(
        expected_lines, actual_lines,
        "{} is stale; rerun with {}=1",
        name, REGENERATE
    );
}
