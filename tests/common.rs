//! Test utilities for inventory-lint integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Write an inventory file under `dir`, creating parent directories
pub fn write_inventory(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Write a `rules/<scope>/<file_name>` declaration under `dir`
pub fn write_rule(dir: &Path, scope: &str, file_name: &str, pattern: &str) -> PathBuf {
    let scope_dir = dir.join("rules").join(scope);
    fs::create_dir_all(&scope_dir).unwrap();
    let path = scope_dir.join(file_name);
    fs::write(&path, format!("{}\n", pattern)).unwrap();
    path
}

/// A small inventory following the default host naming convention
pub const GOOD_INVENTORY: &str = "\
[web]
app-web-01.example.com
app-web-02.example.com

[db]
app-db-01.example.com
";
