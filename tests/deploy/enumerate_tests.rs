// Tests for local tree enumeration
// Root exclusion, ordering, exclude patterns and the filter predicate

use std::fs;
use std::sync::Mutex;

use sftp_deploy::deploy::{DeployError, ExcludePatterns, LocalTree};

use crate::support::{local_dir_of, sample_tree};

#[test]
fn test_enumerate_drops_root_and_keeps_order() {
    let tree = sample_tree();
    let local_dir = local_dir_of(&tree);

    let entries = LocalTree::enumerate(&local_dir, &ExcludePatterns::none(), None).unwrap();

    let expected = vec![
        format!("{}a.txt", local_dir),
        format!("{}sub", local_dir),
        format!("{}sub/b.txt", local_dir),
    ];
    assert_eq!(entries, expected);
}

#[test]
fn test_enumerate_empty_tree() {
    let tree = tempfile::tempdir().unwrap();
    let local_dir = format!("{}/", tree.path().display());

    let entries = LocalTree::enumerate(&local_dir, &ExcludePatterns::none(), None).unwrap();

    assert!(entries.is_empty());
}

#[test]
fn test_enumerate_applies_excludes_before_filter() {
    let tree = sample_tree();
    fs::write(tree.path().join(".DS_Store"), b"junk").unwrap();
    let local_dir = local_dir_of(&tree);

    let seen = Mutex::new(Vec::new());
    let filter = |path: &str| {
        seen.lock().unwrap().push(path.to_string());
        true
    };

    let entries =
        LocalTree::enumerate(&local_dir, &ExcludePatterns::with_defaults(), Some(&filter)).unwrap();

    // The excluded entry never reaches the predicate
    assert!(seen
        .lock()
        .unwrap()
        .iter()
        .all(|path| !path.ends_with(".DS_Store")));
    assert!(entries.iter().all(|path| !path.ends_with(".DS_Store")));
    assert_eq!(entries.len(), 3);
}

#[test]
fn test_enumerate_filter_keeps_enumeration_order() {
    let tree = sample_tree();
    let local_dir = local_dir_of(&tree);

    let entries = LocalTree::enumerate(
        &local_dir,
        &ExcludePatterns::none(),
        Some(&|path: &str| !path.ends_with("a.txt")),
    )
    .unwrap();

    let expected = vec![format!("{}sub", local_dir), format!("{}sub/b.txt", local_dir)];
    assert_eq!(entries, expected);
}

#[test]
fn test_enumerate_rejects_missing_directory() {
    let err =
        LocalTree::enumerate("/definitely/not/here/", &ExcludePatterns::none(), None).unwrap_err();

    assert!(matches!(err, DeployError::LocalEnumeration { .. }));
}

#[test]
fn test_is_directory() {
    let tree = sample_tree();

    assert!(LocalTree::is_directory(
        &tree.path().join("sub").display().to_string()
    ));
    assert!(!LocalTree::is_directory(
        &tree.path().join("a.txt").display().to_string()
    ));
    assert!(!LocalTree::is_directory("/definitely/not/here"));
}
