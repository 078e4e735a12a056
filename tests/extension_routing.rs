//! Extension routing: token case is preserved, the last dot wins, and
//! dot-led or dotless names route to the destination root.

use std::fs;
use tempfile::tempdir;

use ext_copy::{Config, classify_tree};

#[test]
fn tokens_route_to_matching_buckets() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();

    fs::write(src.join("notes.txt"), b"1").unwrap();
    fs::write(src.join("photo.JPG"), b"2").unwrap();
    fs::write(src.join("bundle.tar.gz"), b"3").unwrap();
    fs::write(src.join("Makefile"), b"4").unwrap();
    fs::write(src.join(".env"), b"5").unwrap();
    fs::write(src.join("trailing."), b"6").unwrap();

    let stats = classify_tree(&Config::new(&src, &dest)).unwrap();
    assert_eq!(stats.copied, 6);
    assert_eq!(stats.errors, 0);

    assert!(dest.join("txt/notes.txt").is_file());
    // Case-preserved: JPG, not jpg.
    assert!(dest.join("JPG/photo.JPG").is_file());
    assert!(!dest.join("jpg").exists());
    // Only the text after the last dot names the bucket.
    assert!(dest.join("gz/bundle.tar.gz").is_file());
    // Extensionless variants all land at the root.
    assert!(dest.join("Makefile").is_file());
    assert!(dest.join(".env").is_file());
    assert!(dest.join("trailing.").is_file());
}

#[test]
fn buckets_are_created_lazily() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dest = td.path().join("dest");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dest).unwrap();
    fs::write(src.join("only.log"), b"x").unwrap();

    classify_tree(&Config::new(&src, &dest)).unwrap();

    let dirs: Vec<String> = fs::read_dir(&dest)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs, ["log"], "only buckets for seen tokens exist");
}
