//! Inventory model tests against files on disk

mod common;

use common::{GOOD_INVENTORY, write_inventory};
use inventory_lint::error::InventoryError;
use inventory_lint::inventory::Inventory;
use inventory_lint::types::GroupMatching;
use tempfile::TempDir;

#[test]
fn test_from_path_views() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(temp_dir.path(), "hosts", GOOD_INVENTORY);

    let inv = assert_ok!(Inventory::from_path(&path, GroupMatching::Lenient));

    assert_eq!(inv.path(), path.as_path());
    assert_eq!(inv.line_count(), 6);
    let groups: Vec<usize> = inv.groups().map(|(n, _)| n).collect();
    let hosts: Vec<usize> = inv.hosts().map(|(n, _)| n).collect();
    assert_eq!(groups, vec![1, 5]);
    assert_eq!(hosts, vec![2, 3, 6]);
    assert_eq!(inv.whole_text(), GOOD_INVENTORY);
}

#[test]
fn test_crlf_lines() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(temp_dir.path(), "hosts", "[web]\r\nsrv-01\r\n");

    let inv = assert_ok!(Inventory::from_path(&path, GroupMatching::Strict));

    assert_eq!(inv.groups().count(), 1);
    assert_eq!(assert_some!(inv.line(2)), "srv-01\r\n");
    assert_eq!(inv.line_at_offset(7), Some(2));
}

#[test]
fn test_comments_and_variables_are_not_hosts() {
    let content = "[web]\n# primary\nsrv-01 ansible_port=2222\nsrv-02\n[web:vars]\nntp=pool\n";
    let inv = Inventory::parse("hosts", content, GroupMatching::Lenient);

    let hosts: Vec<&str> = inv.hosts().map(|(_, text)| text).collect();
    assert_eq!(hosts, vec!["srv-02\n"]);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope");

    let err = Inventory::from_path(&path, GroupMatching::Lenient).unwrap_err();
    assert!(matches!(err, InventoryError::NotFound { .. }));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().starts_with("No such file as"));
}

#[test]
fn test_directory_is_a_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Inventory::from_path(temp_dir.path(), GroupMatching::Lenient).unwrap_err();
    assert!(matches!(err, InventoryError::Read { .. }));
}

#[test]
fn test_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(temp_dir.path(), "empty", "");

    let inv = assert_ok!(Inventory::from_path(&path, GroupMatching::Lenient));
    assert_eq!(inv.line_count(), 0);
    assert_eq!(inv.line_at_offset(0), None);
}
