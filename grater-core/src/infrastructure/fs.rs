use crate::infrastructure::error::InfrastructureError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Write content to a file atomically using a temporary file.
///
/// This function:
/// 1. Creates a temporary file in the same directory as the target path.
/// 2. Writes the content to the temporary file.
/// 3. Persists (renames) the temporary file to the target path.
///
/// The target file is either fully written or not written at all.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    debug!(path = ?path, "File written");
    Ok(())
}

/// Marks a generated script as executable (rwxr-xr-x). No-op off Unix.
pub fn make_executable(path: &Path) -> Result<(), InfrastructureError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Shell-style name patterns (`*`, `?`, `[seq]`, `[!seq]`) matched against single
/// file or directory names, never whole paths.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    globset: GlobSet,
}

impl IgnorePatterns {
    pub fn new<I, S>(globs: I) -> Result<Self, InfrastructureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in globs {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .backslash_escape(false)
                .build()
                .map_err(|source| InfrastructureError::IgnorePattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|source| InfrastructureError::IgnorePattern {
                pattern: "<set>".to_string(),
                source,
            })?;
        Ok(Self { globset })
    }

    pub fn none() -> Self {
        Self {
            globset: GlobSet::empty(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.globset.is_match(name)
    }
}

/// Replaces `to` with a copy of the `from` tree, skipping ignored names at every depth.
///
/// Symlinks are followed: a linked directory is copied as a real directory with
/// the target's contents. Returns the number of files copied.
#[instrument(skip(ignore))]
pub fn copy_and_overwrite_tree(
    from: &Path,
    to: &Path,
    ignore: &IgnorePatterns,
) -> Result<usize, InfrastructureError> {
    if to.exists() {
        debug!(path = ?to, "Removing existing tree");
        fs::remove_dir_all(to)?;
    }
    fs::create_dir_all(to)?;

    let mut copied = 0;
    let walker = WalkDir::new(from)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !ignore.matches(&entry.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry.map_err(|source| InfrastructureError::Copy {
            path: from.display().to_string(),
            source,
        })?;

        let relative = entry.path().strip_prefix(from).map_err(|_| {
            InfrastructureError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path prefix error",
            ))
        })?;
        let destination = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
        } else {
            fs::copy(entry.path(), &destination)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copies the files directly inside `from` into `to`, overwriting same-named files.
pub fn copy_dir_files(from: &Path, to: &Path) -> Result<usize, InfrastructureError> {
    fs::create_dir_all(to)?;

    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::copy(entry.path(), to.join(entry.file_name()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("provider.tf");

        atomic_write(&file_path, "region = \"eu-west-1\"")?;

        assert_eq!(fs::read_to_string(file_path)?, "region = \"eu-west-1\"");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("project_config.yml");

        atomic_write(&file_path, "Initial")?;
        atomic_write(&file_path, "Updated")?;

        assert_eq!(fs::read_to_string(file_path)?, "Updated");
        Ok(())
    }

    #[test]
    fn test_ignore_patterns_match_whole_names() -> Result<()> {
        let ignore = IgnorePatterns::new(["__init__*", "tutorial_files", "data?.csv"])?;

        assert!(ignore.matches("__init__.py"));
        assert!(ignore.matches("tutorial_files"));
        assert!(ignore.matches("data1.csv"));

        assert!(!ignore.matches("my__init__.py"));
        assert!(!ignore.matches("tutorial_files_old"));
        assert!(!ignore.matches("data12.csv"));
        assert!(!IgnorePatterns::none().matches("anything"));
        Ok(())
    }

    #[test]
    fn test_ignore_patterns_character_classes() -> Result<()> {
        let ignore = IgnorePatterns::new(["[._]*", "notes_[!0-9]"])?;

        assert!(ignore.matches(".hidden"));
        assert!(ignore.matches("_private.py"));
        assert!(ignore.matches("notes_a"));

        assert!(!ignore.matches("visible.py"));
        assert!(!ignore.matches("notes_1"));
        Ok(())
    }

    #[test]
    fn test_ignore_patterns_reject_malformed_glob() {
        assert!(matches!(
            IgnorePatterns::new(["[unclosed"]),
            Err(InfrastructureError::IgnorePattern { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_follows_directory_symlinks() -> Result<()> {
        let shared = tempdir()?;
        fs::write(shared.path().join("variables.tf"), "variable \"region\" {}")?;

        let src = tempdir()?;
        fs::create_dir_all(src.path().join("terraform"))?;
        std::os::unix::fs::symlink(shared.path(), src.path().join("terraform/shared"))?;

        let dst = tempdir()?;
        let target = dst.path().join("project");
        let copied = copy_and_overwrite_tree(src.path(), &target, &IgnorePatterns::none())?;

        let linked = target.join("terraform/shared");
        assert_eq!(copied, 1);
        assert!(linked.is_dir());
        assert!(!fs::symlink_metadata(&linked)?.file_type().is_symlink());
        assert!(linked.join("variables.tf").is_file());
        Ok(())
    }

    #[test]
    fn test_copy_tree_skips_ignored_entries() -> Result<()> {
        let src = tempdir()?;
        fs::create_dir_all(src.path().join("terraform/buckets"))?;
        fs::create_dir_all(src.path().join("tutorial_files/nested"))?;
        fs::write(src.path().join("lambda_function.py"), "handler")?;
        fs::write(src.path().join("__init__.py"), "")?;
        fs::write(src.path().join("terraform/buckets/main.tf"), "bucket")?;
        fs::write(src.path().join("tutorial_files/nested/file.txt"), "x")?;

        let dst = tempdir()?;
        let target = dst.path().join("project");
        let ignore = IgnorePatterns::new(["__init__*", "tutorial_files"])?;

        let copied = copy_and_overwrite_tree(src.path(), &target, &ignore)?;

        assert_eq!(copied, 2);
        assert!(target.join("lambda_function.py").exists());
        assert!(target.join("terraform/buckets/main.tf").exists());
        assert!(!target.join("__init__.py").exists());
        assert!(!target.join("tutorial_files").exists());
        Ok(())
    }

    #[test]
    fn test_copy_tree_replaces_existing_target() -> Result<()> {
        let src = tempdir()?;
        fs::write(src.path().join("fresh.txt"), "new")?;

        let dst = tempdir()?;
        fs::write(dst.path().join("stale.txt"), "old")?;

        copy_and_overwrite_tree(src.path(), dst.path(), &IgnorePatterns::none())?;

        assert!(dst.path().join("fresh.txt").exists());
        assert!(!dst.path().join("stale.txt").exists());
        Ok(())
    }

    #[test]
    fn test_copy_dir_files_overwrites_flat_files() -> Result<()> {
        let src = tempdir()?;
        fs::write(src.path().join("main.tf"), "tutorial")?;
        fs::create_dir(src.path().join("skipped_dir"))?;

        let dst = tempdir()?;
        fs::write(dst.path().join("main.tf"), "original")?;

        let copied = copy_dir_files(src.path(), dst.path())?;

        assert_eq!(copied, 1);
        assert_eq!(fs::read_to_string(dst.path().join("main.tf"))?, "tutorial");
        assert!(!dst.path().join("skipped_dir").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable_sets_mode() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let script = dir.path().join("build.sh");
        fs::write(&script, "#!/bin/bash")?;

        make_executable(&script)?;

        let mode = fs::metadata(&script)?.permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        Ok(())
    }
}
