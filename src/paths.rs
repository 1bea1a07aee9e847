//! Backup and target path allocation.
//!
//! Three jobs, all centered on never losing an original:
//!
//! - [`resolve_backup_path`] picks a name for one file's backup that does not
//!   exist on disk, suffixing `_001`, `_002`, … before the extension when the
//!   plain name is taken.
//! - [`make_backup_root`] allocates the `backup` directory next to an
//!   in-place conversion source, suffixing `backup_01`, `backup_02`, … when
//!   the name is occupied by something unusable.
//! - [`resolve_target_path`] rebases a source subdirectory under the
//!   destination root, creating missing directories along the way.
//!
//! Directories created here are recorded in [`CreatedDirs`] so the run can
//! prune the ones that end up without any output file. Allocation is
//! exists-then-create and assumes a single writer; a parallel run would need
//! a compare-and-create primitive instead.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("can't create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no free name found near {path}")]
    Exhausted { path: PathBuf },
    #[error("{path} is not under {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Highest numeric suffix tried before giving up on a file name.
const MAX_FILE_SUFFIX: u32 = 999;
/// Highest numeric suffix tried before giving up on a backup root.
const MAX_ROOT_SUFFIX: u32 = 99;

const BACKUP_DIR_NAME: &str = "backup";

/// `photo.jpg` + `_001` → `photo_001.jpg`; extension-less names get the
/// suffix appended.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Pick a backup file path for `source` that does not exist on disk.
///
/// With a `backup_dir` the candidate is the source's name inside it; without
/// one (the directory could not be allocated) the backup lands next to the
/// source with `_backup` spliced in before the extension. Either way, a taken
/// candidate gets `_001` through `_999` tried in order.
pub fn resolve_backup_path(source: &Path, backup_dir: Option<&Path>) -> Result<PathBuf, PathError> {
    let name = source.file_name().map(PathBuf::from).unwrap_or_default();
    let candidate = match backup_dir {
        Some(dir) => dir.join(name),
        None => with_suffix(source, "_backup"),
    };
    first_free(&candidate)
}

/// The lowest-suffixed variant of `candidate` that does not exist yet.
fn first_free(candidate: &Path) -> Result<PathBuf, PathError> {
    if !candidate.exists() {
        return Ok(candidate.to_path_buf());
    }
    for i in 1..=MAX_FILE_SUFFIX {
        let numbered = with_suffix(candidate, &format!("_{i:03}"));
        if !numbered.exists() {
            return Ok(numbered);
        }
    }
    Err(PathError::Exhausted {
        path: candidate.to_path_buf(),
    })
}

/// Allocate the backup root for in-place conversion of `source`.
///
/// For a directory source the root is `<parent>/backup/<dirName>`, so
/// converting `trip/` backs up into `trip/../backup/trip/`; the `backup`
/// component gets `_01`, `_02`, … suffixes until the full path is unused.
/// For a single file the root is `<parent>/backup` and an existing directory
/// of that name is reused, so repeated single-file runs share one backup
/// folder (each file inside it still gets a collision-free name).
pub fn make_backup_root(source: &Path, created: &mut CreatedDirs) -> Result<PathBuf, PathError> {
    let parent = source.parent().unwrap_or(Path::new("")).to_path_buf();
    let source_is_dir = source.is_dir();

    for i in 0..=MAX_ROOT_SUFFIX {
        let base = if i == 0 {
            parent.join(BACKUP_DIR_NAME)
        } else {
            parent.join(format!("{BACKUP_DIR_NAME}_{i:02}"))
        };
        let root = if source_is_dir {
            match source.file_name() {
                Some(name) => base.join(name),
                None => base,
            }
        } else {
            base
        };

        if root.exists() {
            if !source_is_dir && root.is_dir() {
                return Ok(root);
            }
            continue;
        }
        create_dir_tracked(&root, created)?;
        return Ok(root);
    }
    Err(PathError::Exhausted {
        path: parent.join(BACKUP_DIR_NAME),
    })
}

/// Rebase `dir`, a descendant of `source_upper_root`, under `target_root`,
/// creating (and recording) any missing directories on the way down.
pub fn resolve_target_path(
    source_upper_root: &Path,
    target_root: &Path,
    dir: &Path,
    created: &mut CreatedDirs,
) -> Result<PathBuf, PathError> {
    let relative = dir
        .strip_prefix(source_upper_root)
        .map_err(|_| PathError::OutsideRoot {
            path: dir.to_path_buf(),
            root: source_upper_root.to_path_buf(),
        })?;
    let target = target_root.join(relative);
    create_dir_tracked(&target, created)?;
    Ok(target)
}

/// `create_dir_all` that records which directories it actually created, one
/// component at a time, skipping pre-existing ones.
pub fn create_dir_tracked(dir: &Path, created: &mut CreatedDirs) -> Result<(), PathError> {
    let mut current = PathBuf::new();
    for component in dir.components() {
        current.push(component);
        if current.exists() {
            continue;
        }
        std::fs::create_dir(&current).map_err(|source| PathError::CreateDir {
            path: current.clone(),
            source,
        })?;
        created.record(&current);
    }
    Ok(())
}

/// Directories created during one run, pruned at the end if they never
/// received an output file.
#[derive(Debug, Default)]
pub struct CreatedDirs {
    dirs: HashSet<PathBuf>,
}

impl CreatedDirs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, dir: &Path) {
        self.dirs.insert(dir.to_path_buf());
    }

    /// An output file landed at `path`: its ancestors are no longer empty and
    /// must survive cleanup.
    pub fn mark_output(&mut self, path: &Path) {
        self.dirs.retain(|dir| !path.starts_with(dir));
    }

    /// Remove every remaining directory whose subtree holds no files.
    /// Deepest-first, best-effort; a directory that gained files through some
    /// side channel is left alone.
    pub fn cleanup(self) {
        let mut dirs: Vec<PathBuf> = self.dirs.into_iter().collect();
        dirs.sort_by_key(|d| std::cmp::Reverse(d.components().count()));

        for dir in dirs {
            let has_files = WalkDir::new(&dir)
                .into_iter()
                .filter_map(Result::ok)
                .any(|entry| entry.file_type().is_file());
            if !has_files {
                let _ = std::fs::remove_dir_all(&dir);
            }
        }
    }

    #[cfg(test)]
    fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }
}
