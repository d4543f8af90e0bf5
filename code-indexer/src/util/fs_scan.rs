//! Java source scanner.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", ".idea", ".gradle", "target", "build", "out", "node_modules"];

/// All `*.java` files under `root`, sorted by path so repeated scans agree.
///
/// `excludes` are directory names (not paths) skipped at any depth, in
/// addition to hidden directories.
pub fn scan_java_files(root: &Path, excludes: &[&str]) -> Vec<PathBuf> {
    let skip = |e: &DirEntry| {
        e.depth() > 0
            && e.file_type().is_dir()
            && e.file_name()
                .to_str()
                .is_some_and(|n| n.starts_with('.') || excludes.contains(&n))
    };

    let mut out: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !skip(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("java"))
        .map(|e| e.into_path())
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_java_files_and_skips_excluded_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/main/java/app")).unwrap();
        fs::create_dir_all(root.join("build/generated")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();

        fs::write(root.join("src/main/java/app/B.java"), "class B {}").unwrap();
        fs::write(root.join("src/main/java/app/A.java"), "class A {}").unwrap();
        fs::write(root.join("src/main/java/app/notes.md"), "# notes").unwrap();
        fs::write(root.join("build/generated/Gen.java"), "class Gen {}").unwrap();
        fs::write(root.join(".git/Hook.java"), "class Hook {}").unwrap();

        let found = scan_java_files(root, DEFAULT_EXCLUDES);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["A.java", "B.java"]);
    }
}
