//! The canonical four-file scenario: two subtrees, one cross-tree duplicate,
//! one extensionless file, run twice.

use assert_fs::prelude::*;
use ext_copy::{Config, classify_tree};

#[test]
fn scenario_copies_three_then_skips_all_four() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    let dest = temp.child("dest");
    src.create_dir_all().unwrap();
    dest.create_dir_all().unwrap();

    src.child("a/x.txt").write_str("shared bytes").unwrap();
    src.child("a/y.txt").write_str("only y").unwrap();
    // Same bytes as a/x.txt, different subtree.
    src.child("b/x.txt").write_str("shared bytes").unwrap();
    // No extension: routed to the destination root.
    src.child("b/z").write_str("extensionless").unwrap();

    let cfg = Config::new(src.path(), dest.path());
    let first = classify_tree(&cfg).unwrap();
    assert_eq!(first.copied, 3, "b/x.txt is a duplicate and must not be written");
    assert_eq!(first.skipped, 1);
    assert_eq!(first.errors, 0);

    dest.child("txt/x.txt").assert("shared bytes");
    dest.child("txt/y.txt").assert("only y");
    dest.child("z").assert("extensionless");
    assert!(
        !dest.child("txt/x_copy-2.txt").path().exists(),
        "identical content must never be duplicated"
    );

    // Second run: nothing new, everything recognized.
    let second = classify_tree(&cfg).unwrap();
    assert_eq!(second.copied, 0);
    assert_eq!(second.skipped, 4);
    assert_eq!(second.errors, 0);

    // Exactly the four expected destination files, nothing else.
    let mut names: Vec<String> = walkdir::WalkDir::new(dest.path())
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["x.txt", "y.txt", "z"]);
}
