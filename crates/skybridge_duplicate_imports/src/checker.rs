use anyhow::{Result, anyhow};
use log::{debug, info, trace};
use rayon::prelude::*;
use skybridge_core::{Extraction, FileImports, ImportParser, SourceFile, discover};

use crate::{
    config::{AllowList, Config},
    types::{CheckResult, Duplicate, DuplicateReport, ImportIndex},
};

pub fn run_duplicate_import_check(cfg: &Config) -> Result<CheckResult> {
    info!("Starting duplicate import check");
    let root = &cfg.path;
    info!("Using root directory: {}", root.display());

    let filter = cfg.path_filter();
    let files = discover(root, filter.as_ref())?.collect::<skybridge_core::Result<Vec<_>>>()?;
    info!("Found {} source files", files.len());

    // Parsing is per file and read-only; the merge below stays sequential.
    let extractions: Vec<(SourceFile, Extraction)> = files
        .into_par_iter()
        .map_init(ImportParser::new, |parser, file| -> Result<(SourceFile, Extraction)> {
            let parser = parser.as_mut().map_err(|e| anyhow!("{e}"))?;
            let extraction = parser.imports_for(&file)?;
            Ok((file, extraction))
        })
        .collect::<Result<_>>()?;

    let files_scanned = extractions.len();
    let mut syntax_errors = Vec::new();
    let mut parsed = Vec::with_capacity(files_scanned);
    for (file, extraction) in extractions {
        if extraction.is_syntax_error() {
            syntax_errors.push(file.clone());
        }
        parsed.push((file, extraction.into_imports()));
    }

    let index = aggregate(parsed);
    debug!("Indexed {} distinct import identities", index.len());

    let report = find_duplicates(&index, &cfg.allow_list);
    info!("Duplicate import check complete. Found {} duplicates", report.len());

    Ok(CheckResult { report, syntax_errors, files_scanned })
}

/// Build the identity to files index from per-file imports, in the given order.
pub fn aggregate<I>(files: I) -> ImportIndex
where
    I: IntoIterator<Item = (SourceFile, FileImports)>,
{
    let mut index = ImportIndex::default();
    for (file, imports) in files {
        trace!("Indexing {} identities from {}", imports.len(), file);
        for (kind, identity) in imports.iter() {
            index.add(kind, identity, &file);
        }
    }
    index
}

/// Identities declared by two or more files and not covered by `allow_list`.
///
/// Direct imports are listed before from-imports; within each kind the order
/// is that of first discovery.
pub fn find_duplicates(index: &ImportIndex, allow_list: &AllowList) -> DuplicateReport {
    let mut report = DuplicateReport::default();

    for (identity, files) in index.direct.iter() {
        if files.len() < 2 {
            continue;
        }
        if allow_list.allows_direct(identity) {
            trace!("Allowing shared direct import: '{}'", identity);
            continue;
        }
        report.push(Duplicate {
            key: format!("import {identity}"),
            files: files.to_vec(),
        });
    }

    for (identity, files) in index.from.iter() {
        if files.len() < 2 {
            continue;
        }
        let parts: Vec<&str> = identity.split('.').collect();
        let (name, module_parts) = match parts.split_last() {
            Some((name, module_parts)) => (*name, module_parts),
            None => continue,
        };
        if allow_list.allows_from(module_parts) {
            trace!("Allowing shared from import: '{}'", identity);
            continue;
        }
        report.push(Duplicate {
            key: format!("from {} import {}", module_parts.join("."), name),
            files: files.to_vec(),
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use skybridge_core::ImportKind;
    use std::{
        fs,
        path::{Path, PathBuf},
    };
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn relative(files: &[SourceFile]) -> Vec<String> {
        files.iter().map(|f| f.relative().to_string_lossy().replace('\\', "/")).collect()
    }

    fn check(root: &Path) -> CheckResult {
        run_duplicate_import_check(&Config::new(root)).unwrap()
    }

    fn check_with(root: &Path, allow_list: AllowList) -> CheckResult {
        let mut cfg = Config::new(root);
        cfg.allow_list = allow_list;
        run_duplicate_import_check(&cfg).unwrap()
    }

    fn imports(direct: &[&str], from: &[&str]) -> FileImports {
        FileImports {
            direct: direct.iter().map(|s| s.to_string()).collect(),
            from: from.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_no_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "import os\nfrom json import loads\n");
        create_test_file(root, "b.py", "import sys\nfrom json import dumps\n");

        let result = check(root);
        assert!(result.report.is_empty());
        assert_eq!(result.files_scanned, 2);
    }

    #[test]
    fn test_direct_duplicate_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "import os\nfrom json import loads\n");
        create_test_file(root, "b.py", "import os\n");

        let result = check_with(root, AllowList::new("pkg", ["types", "__init__"]));
        assert_eq!(result.report.len(), 1);
        assert_eq!(result.report.keys().collect::<Vec<_>>(), vec!["import os"]);
        assert_eq!(relative(result.report.get("import os").unwrap()), vec!["a.py", "b.py"]);
        assert!(!result.report.contains_key("from json import loads"));
    }

    #[test]
    fn test_dotted_direct_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "one.py", "import x.y\n");
        create_test_file(root, "two.py", "import x.y as z\n");

        let result = check(root);
        assert_eq!(relative(result.report.get("import x.y").unwrap()), vec!["one.py", "two.py"]);
    }

    #[test]
    fn test_from_duplicate_key_format() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "from a.b import c\n");
        create_test_file(root, "b.py", "from a.b import c, d\n");

        let result = check(root);
        assert_eq!(result.report.keys().collect::<Vec<_>>(), vec!["from a.b import c"]);
    }

    #[test]
    fn test_allow_listed_from_import_not_reported() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for name in ["a.py", "b.py", "c.py"] {
            create_test_file(root, name, "from pkg.types import X\nfrom pkg.__init__ import Y\n");
        }

        let result = check_with(root, AllowList::new("pkg", ["types", "__init__"]));
        assert!(result.report.is_empty());
    }

    #[test]
    fn test_default_allow_list_covers_src_types() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "import src.types\nfrom src.types import Path\n");
        create_test_file(root, "b.py", "import src.types\nfrom src.types import Path\n");

        assert!(check(root).report.is_empty());
    }

    #[test]
    fn test_test_paths_are_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "app.py", "import requests\n");
        create_test_file(root, "testing_utils.py", "import requests\n");
        create_test_file(root, "venv/lib/site.py", "import requests\n");

        let result = check(root);
        assert!(result.report.is_empty());
        assert_eq!(result.files_scanned, 1);
    }

    #[test]
    fn test_syntax_error_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "import requests\n");
        create_test_file(root, "b.py", "import requests\n");
        create_test_file(root, "broken.py", "import requests\ndef oops(:\n");

        let result = check(root);
        assert_eq!(relative(result.report.get("import requests").unwrap()), vec!["a.py", "b.py"]);
        assert_eq!(relative(&result.syntax_errors), vec!["broken.py"]);
        assert_eq!(result.files_scanned, 3);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("src");

        let err = run_duplicate_import_check(&Config::new(&missing)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<skybridge_core::Error>(),
            Some(skybridge_core::Error::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_unreadable_file_aborts_scan() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "import os\n");
        create_test_file(root, "b.py", "import os\n");
        fs::write(root.join("c.py"), b"# caf\xe9\nimport os\n").unwrap();

        let err = run_duplicate_import_check(&Config::new(root)).unwrap_err();
        match err.downcast_ref::<skybridge_core::Error>() {
            Some(skybridge_core::Error::Read { path, .. }) => {
                assert_eq!(path, &root.join("c.py"));
            }
            other => panic!("expected a read error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_aggregate_lists_repeated_file_once() {
        let a = SourceFile::new(Path::new("src"), PathBuf::from("src/a.py"));
        let b = SourceFile::new(Path::new("src"), PathBuf::from("src/b.py"));

        let index = aggregate(vec![
            (a.clone(), imports(&["os"], &[])),
            (a.clone(), imports(&["os"], &[])),
            (b.clone(), imports(&["os"], &[])),
        ]);
        assert_eq!(index.files(ImportKind::Direct, "os").unwrap(), &[a, b]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.py", "import os\nimport sys\nfrom json import loads\n");
        create_test_file(root, "pkg/b.py", "import sys\nimport os\nfrom json import loads\n");
        create_test_file(root, "pkg/c.py", "from json import loads\nimport os\n");

        let first = check(root);
        let second = check(root);
        assert_eq!(first.report, second.report);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_aggregate_keeps_kinds_apart() {
        let a = SourceFile::new(Path::new("src"), PathBuf::from("src/a.py"));
        let b = SourceFile::new(Path::new("src"), PathBuf::from("src/b.py"));

        let index = aggregate(vec![
            (a.clone(), imports(&["a.b"], &[])),
            (b.clone(), imports(&[], &["a.b"])),
        ]);
        assert_eq!(index.files(ImportKind::Direct, "a.b").unwrap(), &[a]);
        assert_eq!(index.files(ImportKind::From, "a.b").unwrap(), &[b]);

        let report = find_duplicates(&index, &AllowList::default());
        assert!(report.is_empty());
    }

    #[test]
    fn test_find_duplicates_orders_direct_before_from() {
        let a = SourceFile::new(Path::new("src"), PathBuf::from("src/a.py"));
        let b = SourceFile::new(Path::new("src"), PathBuf::from("src/b.py"));

        let index = aggregate(vec![
            (a.clone(), imports(&["zlib"], &["collections.deque"])),
            (b.clone(), imports(&["zlib"], &["collections.deque"])),
        ]);
        let report = find_duplicates(&index, &AllowList::default());
        assert_eq!(
            report.keys().collect::<Vec<_>>(),
            vec!["import zlib", "from collections import deque"]
        );
        assert_eq!(report.get("import zlib").unwrap(), &[a, b]);
    }

    #[test]
    fn test_find_duplicates_relative_empty_module() {
        let a = SourceFile::new(Path::new("src"), PathBuf::from("src/a.py"));
        let b = SourceFile::new(Path::new("src"), PathBuf::from("src/b.py"));

        let index =
            aggregate(vec![(a, imports(&[], &[".helpers"])), (b, imports(&[], &[".helpers"]))]);
        let report = find_duplicates(&index, &AllowList::default());
        assert_eq!(report.keys().collect::<Vec<_>>(), vec!["from  import helpers"]);
    }

    #[test]
    fn test_find_duplicates_from_root_alone_not_exempt() {
        // `from src import types` has a single-segment module path
        let a = SourceFile::new(Path::new("src"), PathBuf::from("src/a.py"));
        let b = SourceFile::new(Path::new("src"), PathBuf::from("src/b.py"));

        let index =
            aggregate(vec![(a, imports(&[], &["src.types"])), (b, imports(&[], &["src.types"]))]);
        let report = find_duplicates(&index, &AllowList::default());
        assert!(report.contains_key("from src import types"));
    }
}
