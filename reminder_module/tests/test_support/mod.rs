#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const FAKE_CRONTAB: &str = r#"#!/bin/sh
store="$(dirname "$0")/crontab.txt"
case "$1" in
  -l)
    if [ -f "$store" ]; then
      cat "$store"
    else
      echo "no crontab for tester" >&2
      exit 1
    fi
    ;;
  -)
    cat > "$store"
    ;;
  *)
    echo "unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#;

/// Writes a `crontab` stand-in into `dir` that keeps its table in `dir/crontab.txt`.
#[cfg(unix)]
pub fn install_fake_crontab(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("crontab");
    fs::write(&script, FAKE_CRONTAB).expect("write fake crontab");
    let mut perms = fs::metadata(&script).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("chmod fake crontab");
    script
}

pub fn crontab_table(dir: &Path) -> Option<String> {
    fs::read_to_string(dir.join("crontab.txt")).ok()
}

pub fn seed_crontab_table(dir: &Path, text: &str) {
    fs::write(dir.join("crontab.txt"), text).expect("seed crontab");
}
