//! Checks that the unit test tree mirrors the source tree

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module organization files carry no logic of their own
    fn is_organizational(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn collect_rust_paths(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_prefix_error| io::Error::other("path outside base"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                collect_rust_paths(&path, base, paths)?;
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn tree(root: &str) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        let base = Path::new(root);
        if let Err(error) = collect_rust_paths(base, base, &mut paths) {
            assert!(!base.exists(), "Failed to read {root}: {error}");
        }
        paths
    }

    // Tests every source module has a unit test file at the mirrored path
    // Verified by deleting a unit test file
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let tests = tree("tests/unit");
        let missing: Vec<String> = tree("src")
            .into_iter()
            .filter(|path| !is_organizational(path) && !tests.contains(path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source module
    // Verified by adding a unit test file for a removed module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let sources = tree("src");
        let orphaned: Vec<String> = tree("tests/unit")
            .into_iter()
            .filter(|path| !is_organizational(path) && !sources.contains(path))
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files with no source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests every test file actually declares tests
    // Verified by adding a test file with only helpers
    #[test]
    fn test_all_test_files_contain_tests() {
        let mut empty = Vec::new();
        for relative in tree("tests") {
            let file_name = relative.rsplit('/').next().unwrap_or_default();
            if !relative.ends_with(".rs") || file_name == "main.rs" || file_name == "mod.rs" {
                continue;
            }

            let content = fs::read_to_string(Path::new("tests").join(&relative))
                .unwrap_or_default();
            if !content.contains("#[test]") {
                empty.push(format!("  - tests/{relative}"));
            }
        }

        assert!(
            empty.is_empty(),
            "Test files without any #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
