//! Contains the logic for turning an asset directory into a listing.

use crate::context::RunContext;
use crate::error::SpliceError;
use crate::manifest::{relative_to, ManifestEntry, ScanResult};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File names that never appear in a listing.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Options controlling which files are listed.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files with one of these names are skipped. Directories are never filtered.
    pub ignored_files: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignored_files: DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    fn is_ignored(&self, name: &OsStr) -> bool {
        self.ignored_files.iter().any(|ignored| name == ignored.as_str())
    }
}

/// Walks `ctx.input_dir` depth-first and lists every file in it.
///
/// Children of each directory are visited in file-name order. Paths are
/// rendered relative to `ctx.working_dir`, not to the scan root.
///
/// Fails with [`SpliceError::Scan`] when the scan root itself cannot be
/// listed. A nested directory that cannot be listed is logged, recorded in
/// [`ScanResult::skipped`] and left out.
pub fn scan(ctx: &RunContext, options: &ScanOptions) -> Result<ScanResult, SpliceError> {
    scan_with(ctx, options, &list_dir)
}

/// One child of a listed directory.
struct Child {
    path: PathBuf,
    name: OsString,
    is_dir: bool,
}

type ListDir<'a> = &'a dyn Fn(&Path) -> io::Result<Vec<Child>>;

fn list_dir(dir: &Path) -> io::Result<Vec<Child>> {
    fs::read_dir(dir)?
        .map(|entry| {
            let entry = entry?;
            // `file_type` does not follow symlinks, so a link to a directory is listed as a file.
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Ok(Child {
                path: entry.path(),
                name: entry.file_name(),
                is_dir,
            })
        })
        .collect()
}

fn scan_with(
    ctx: &RunContext,
    options: &ScanOptions,
    list: ListDir<'_>,
) -> Result<ScanResult, SpliceError> {
    let mut result = ScanResult::new();
    visit(&ctx.input_dir, ctx, options, list, &mut result)?;
    log::info!(
        "Found {} asset(s) under {}",
        result.len(),
        ctx.input_dir.display()
    );
    Ok(result)
}

fn visit(
    dir: &Path,
    ctx: &RunContext,
    options: &ScanOptions,
    list: ListDir<'_>,
    result: &mut ScanResult,
) -> Result<(), SpliceError> {
    let mut children = list(dir).map_err(|source| SpliceError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;
    children.sort_by(|a, b| a.name.cmp(&b.name));

    for child in children {
        if child.is_dir {
            log::debug!("Entering {}", child.path.display());
            if let Err(err) = visit(&child.path, ctx, options, list, result) {
                log::warn!("Skipping subtree: {err}");
                result.skip(child.path);
            }
        } else if options.is_ignored(&child.name) {
            log::debug!("Ignoring {}", child.path.display());
        } else {
            let relative = relative_to(&child.path, &ctx.working_dir);
            log::debug!("Listing {}", relative.display());
            result.push(ManifestEntry::from_path(&relative));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    fn context_for(temp: &TempDir) -> RunContext {
        RunContext::resolve(temp.path(), None, None)
    }

    fn scanned_paths(temp: &TempDir) -> Vec<String> {
        scan(&context_for(temp), &ScanOptions::default())
            .unwrap()
            .paths()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn lists_files_recursively_relative_to_working_dir() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/images/logo.png").touch().unwrap();
        temp.child("assets/fonts/body.ttf").touch().unwrap();
        temp.child("assets/readme.txt").touch().unwrap();

        assert_eq!(
            scanned_paths(&temp),
            vec![
                "assets/fonts/body.ttf",
                "assets/images/logo.png",
                "assets/readme.txt",
            ]
        );
    }

    #[test]
    fn ignored_file_never_appears_at_any_depth() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/.DS_Store").touch().unwrap();
        temp.child("assets/images/.DS_Store").touch().unwrap();
        temp.child("assets/images/deep/.DS_Store").touch().unwrap();
        temp.child("assets/images/logo.png").touch().unwrap();

        assert_eq!(scanned_paths(&temp), vec!["assets/images/logo.png"]);
    }

    #[test]
    fn directories_named_like_ignored_files_are_still_walked() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/.DS_Store/inner.png").touch().unwrap();

        assert_eq!(scanned_paths(&temp), vec!["assets/.DS_Store/inner.png"]);
    }

    #[test]
    fn empty_directories_contribute_nothing() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/empty").create_dir_all().unwrap();

        assert!(scanned_paths(&temp).is_empty());
    }

    #[test]
    fn scanning_twice_gives_identical_results() {
        let temp = TempDir::new().unwrap();
        for name in ["c.png", "a/b.png", "a/a.png", "b/z/y.png"] {
            temp.child("assets").child(name).touch().unwrap();
        }

        let ctx = context_for(&temp);
        let first = scan(&ctx, &ScanOptions::default()).unwrap();
        let second = scan(&ctx, &ScanOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = scan(&context_for(&temp), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, SpliceError::Scan { .. }));
    }

    #[test]
    fn custom_ignore_list_is_honoured() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/Thumbs.db").touch().unwrap();
        temp.child("assets/.DS_Store").touch().unwrap();

        let options = ScanOptions {
            ignored_files: vec!["Thumbs.db".to_string()],
        };
        let result = scan(&context_for(&temp), &options).unwrap();
        assert_eq!(result.paths().collect::<Vec<_>>(), vec!["assets/.DS_Store"]);
    }

    #[test]
    fn root_outside_working_dir_is_rendered_with_parent_components() {
        let temp = TempDir::new().unwrap();
        temp.child("shared/icon.png").touch().unwrap();
        temp.child("app").create_dir_all().unwrap();

        let ctx = RunContext::resolve(temp.path().join("app"), Some(Path::new("../shared")), None);
        let result = scan(&ctx, &ScanOptions::default()).unwrap();
        assert_eq!(result.paths().collect::<Vec<_>>(), vec!["../shared/icon.png"]);
    }

    fn failing_on(name: &'static str) -> impl Fn(&Path) -> io::Result<Vec<Child>> {
        move |dir: &Path| {
            if dir.file_name() == Some(OsStr::new(name)) {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            } else {
                list_dir(dir)
            }
        }
    }

    #[test]
    fn unreadable_subtree_is_skipped() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/ok.png").touch().unwrap();
        temp.child("assets/locked/hidden.png").touch().unwrap();
        temp.child("assets/open/deep.png").touch().unwrap();

        let ctx = context_for(&temp);
        let list = failing_on("locked");
        let result = scan_with(&ctx, &ScanOptions::default(), &list).unwrap();

        assert_eq!(
            result.paths().collect::<Vec<_>>(),
            vec!["assets/ok.png", "assets/open/deep.png"]
        );
        assert_eq!(result.skipped(), [temp.path().join("assets/locked")]);
    }

    #[test]
    fn unreadable_root_aborts_the_scan() {
        let temp = TempDir::new().unwrap();
        temp.child("assets/ok.png").touch().unwrap();

        let list = failing_on("assets");
        let err = scan_with(&context_for(&temp), &ScanOptions::default(), &list).unwrap_err();
        assert!(
            matches!(&err, SpliceError::Scan { path, .. } if path.ends_with("assets")),
            "unexpected error: {err:?}"
        );
    }
}
