//! File-set traversal and per-file conversion orchestration.
//!
//! A run goes scan → convert → cleanup. Scanning partitions the input paths
//! into files and directories and sorts both lists so runs are
//! deterministic. Converting walks each directory tree depth-first, then the
//! standalone files, and for every supported image computes its backup or
//! target path and drives the conversion through the [`ImageBackend`].
//! Cleanup prunes directories this run created but never filled.
//!
//! Per-file failures are logged and the run continues; only two conditions
//! abort it: a destination that exists but is not a folder, and a missing
//! ImageMagick binary.
//!
//! In-place conversion moves the original into a backup location first, then
//! converts from the backup back to the original name, so a crash mid-file
//! leaves the original intact. With `--destination` the source itself is the
//! backup and never moves.

use crate::backend::{BackendError, ConvertParams, ImageBackend, Resize};
use crate::config::ConvertConfig;
use crate::label::Labeler;
use crate::metrics::ImageMetrics;
use crate::output;
use crate::paths::{self, CreatedDirs};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("destination is not a folder: {0}")]
    DestinationNotFolder(PathBuf),
    #[error("ImageMagick not found; this command may be wrong: {0}")]
    ToolMissing(String),
}

/// Counters reported after a run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub files_found: u32,
    pub files_converted: u32,
    /// At least one input path existed. Distinguishes "nothing matched" from
    /// "nothing was there".
    pub source_found: bool,
    pub elapsed: Duration,
}

/// Drives one conversion run over a set of input paths.
pub struct Walker<'a, B: ImageBackend> {
    backend: &'a B,
    config: &'a ConvertConfig,
    labeler: Labeler,
    target_root: Option<PathBuf>,
    backup_enabled: bool,
    stats: RunStats,
    created: CreatedDirs,
}

impl<'a, B: ImageBackend> Walker<'a, B> {
    pub fn new(
        backend: &'a B,
        config: &'a ConvertConfig,
        labeler: Labeler,
        target_root: Option<PathBuf>,
        backup_enabled: bool,
    ) -> Result<Self, WalkError> {
        if let Some(root) = &target_root
            && root.exists()
            && !root.is_dir()
        {
            return Err(WalkError::DestinationNotFolder(root.clone()));
        }
        Ok(Self {
            backend,
            config,
            labeler,
            target_root,
            backup_enabled,
            stats: RunStats::default(),
            created: CreatedDirs::new(),
        })
    }

    /// Convert everything under `paths`. Cleanup of incidentally created
    /// directories runs on every exit path, fatal errors included.
    pub fn run(mut self, paths: &[PathBuf]) -> Result<RunStats, WalkError> {
        let start = Instant::now();
        let result = self.convert_all(paths);
        std::mem::take(&mut self.created).cleanup();
        self.stats.elapsed = start.elapsed();
        result.map(|_| self.stats)
    }

    fn convert_all(&mut self, paths: &[PathBuf]) -> Result<(), WalkError> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for path in paths {
            if !path.exists() {
                output::error(&format!("source not found:\n  {}", path.display()));
                continue;
            }
            if let Some(target_root) = &self.target_root {
                let source_dir = path.parent().unwrap_or(Path::new(""));
                if path == target_root || source_dir == target_root.as_path() {
                    output::error(&format!(
                        "source and destination files are the same:\n  {}\n\
                         to replace originals with converted files, drop the \
                         --destination folder and pass --no-backup",
                        path.display()
                    ));
                    continue;
                }
            }
            if path.is_dir() {
                dirs.push(path.clone());
            } else {
                files.push(path.clone());
            }
        }

        self.stats.source_found = !dirs.is_empty() || !files.is_empty();
        dirs.sort();
        files.sort();

        for dir in &dirs {
            match self.target_root.clone() {
                Some(target_root) => self.process_dir_target(dir, &target_root)?,
                None => self.process_dir_inplace(dir)?,
            }
        }
        self.process_files(&files)
    }

    fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_path_buf())
    }

    fn process_dir_inplace(&mut self, root: &Path) -> Result<(), WalkError> {
        let mut backup_root: Option<PathBuf> = None;
        let mut backup_root_failed = false;
        // One backup directory per source directory, resolved on its first
        // matching file.
        let mut backup_dirs: HashMap<PathBuf, Option<PathBuf>> = HashMap::new();

        for source in Self::walk_files(root) {
            if !self.config.matches_extension(&source) {
                continue;
            }
            self.stats.files_found += 1;

            if !self.backup_enabled {
                self.convert_file(&source, &source, None)?;
                continue;
            }

            let dir = source.parent().unwrap_or(root).to_path_buf();
            let backup_dir = match backup_dirs.get(&dir) {
                Some(cached) => cached.clone(),
                None => {
                    let resolved =
                        self.backup_dir_for(root, &dir, &mut backup_root, &mut backup_root_failed);
                    backup_dirs.insert(dir, resolved.clone());
                    resolved
                }
            };

            match paths::resolve_backup_path(&source, backup_dir.as_deref()) {
                Ok(backup) => self.convert_file(&source, &source, Some(&backup))?,
                Err(error) => output::error(&format!(
                    "can't allocate backup for:\n  {}\n{error}",
                    source.display()
                )),
            }
        }
        Ok(())
    }

    /// Backup directory for `dir` inside the tree rooted at `root`,
    /// allocating the tree's backup root on first use. `None` means the
    /// caller falls back to a `_backup` sibling next to each file.
    fn backup_dir_for(
        &mut self,
        root: &Path,
        dir: &Path,
        backup_root: &mut Option<PathBuf>,
        backup_root_failed: &mut bool,
    ) -> Option<PathBuf> {
        if backup_root.is_none() && !*backup_root_failed {
            match paths::make_backup_root(root, &mut self.created) {
                Ok(allocated) => *backup_root = Some(allocated),
                Err(error) => {
                    *backup_root_failed = true;
                    output::error(&format!(
                        "can't create backup dir for path:\n  {}\n{error}",
                        root.display()
                    ));
                }
            }
        }
        let base = backup_root.as_ref()?;
        if dir == root {
            return Some(base.clone());
        }
        match paths::resolve_target_path(root, base, dir, &mut self.created) {
            Ok(backup_dir) => Some(backup_dir),
            Err(error) => {
                output::error(&format!(
                    "can't create backup dir for path:\n  {}\n{error}",
                    dir.display()
                ));
                None
            }
        }
    }

    fn process_dir_target(&mut self, root: &Path, target_root: &Path) -> Result<(), WalkError> {
        // Rebasing from the parent of `root` recreates `root` itself inside
        // the destination, so converting `trip/` into `out/` yields
        // `out/trip/...` rather than spilling files directly into `out/`.
        let source_upper_root = root.parent().unwrap_or(Path::new("")).to_path_buf();
        let mut target_dirs: HashMap<PathBuf, Option<PathBuf>> = HashMap::new();

        for source in Self::walk_files(root) {
            if !self.config.matches_extension(&source) {
                continue;
            }
            self.stats.files_found += 1;

            let dir = source.parent().unwrap_or(root).to_path_buf();
            let target_dir = match target_dirs.get(&dir) {
                Some(cached) => cached.clone(),
                None => {
                    let resolved = match paths::resolve_target_path(
                        &source_upper_root,
                        target_root,
                        &dir,
                        &mut self.created,
                    ) {
                        Ok(target_dir) => Some(target_dir),
                        Err(error) => {
                            output::error(&format!(
                                "can't create destination folder for:\n  {}\n{error}",
                                dir.display()
                            ));
                            None
                        }
                    };
                    target_dirs.insert(dir, resolved.clone());
                    resolved
                }
            };
            let Some(target_dir) = target_dir else {
                continue;
            };

            let name = source.file_name().map(PathBuf::from).unwrap_or_default();
            // The untouched source doubles as the backup.
            self.convert_file(&source, &target_dir.join(name), Some(&source))?;
        }
        Ok(())
    }

    fn process_files(&mut self, files: &[PathBuf]) -> Result<(), WalkError> {
        match self.target_root.clone() {
            Some(target_root) => self.process_files_target(files, &target_root),
            None => self.process_files_inplace(files),
        }
    }

    fn process_files_target(
        &mut self,
        files: &[PathBuf],
        target_root: &Path,
    ) -> Result<(), WalkError> {
        let mut root_created = false;

        for file in files {
            if !self.config.matches_extension(file) {
                continue;
            }
            self.stats.files_found += 1;

            if !root_created {
                if let Err(error) = paths::create_dir_tracked(target_root, &mut self.created) {
                    output::error(&format!(
                        "can't create destination folder:\n  {}\n{error}",
                        target_root.display()
                    ));
                    return Ok(());
                }
                root_created = true;
            }

            // Standalone files land flat in the destination; same-named
            // files from different source directories get numeric suffixes
            // instead of overwriting each other.
            match paths::resolve_backup_path(file, Some(target_root)) {
                Ok(target) => self.convert_file(file, &target, Some(file))?,
                Err(error) => output::error(&format!(
                    "can't allocate destination name for:\n  {}\n{error}",
                    file.display()
                )),
            }
        }
        Ok(())
    }

    fn process_files_inplace(&mut self, files: &[PathBuf]) -> Result<(), WalkError> {
        let mut current_dir: Option<PathBuf> = None;
        let mut backup_root: Option<PathBuf> = None;

        for file in files {
            if !self.config.matches_extension(file) {
                continue;
            }
            self.stats.files_found += 1;

            if !self.backup_enabled {
                self.convert_file(file, file, None)?;
                continue;
            }

            // Files are sorted, so same-directory files arrive together and
            // share one backup root.
            let dir = file.parent().unwrap_or(Path::new("")).to_path_buf();
            if current_dir.as_deref() != Some(dir.as_path()) {
                current_dir = Some(dir);
                backup_root = match paths::make_backup_root(file, &mut self.created) {
                    Ok(root) => Some(root),
                    Err(error) => {
                        output::error(&format!(
                            "can't create backup dir for path:\n  {}\n{error}",
                            file.display()
                        ));
                        None
                    }
                };
            }

            match paths::resolve_backup_path(file, backup_root.as_deref()) {
                Ok(backup) => self.convert_file(file, file, Some(&backup))?,
                Err(error) => output::error(&format!(
                    "can't allocate backup for:\n  {}\n{error}",
                    file.display()
                )),
            }
        }
        Ok(())
    }

    fn convert_file(
        &mut self,
        source: &Path,
        target: &Path,
        backup: Option<&Path>,
    ) -> Result<(), WalkError> {
        // A plan whose target would overwrite its own backup loses the
        // original; refuse to run it.
        if backup == Some(target) {
            return Ok(());
        }

        let mut image = ImageMetrics::new(self.backend, source.to_path_buf());

        let (width, height) = (image.width(), image.height());
        let resize = if width > self.config.max_side || height > self.config.max_side {
            Some(if width > height {
                Resize::Width(self.config.max_side)
            } else {
                Resize::Height(self.config.max_side)
            })
        } else {
            None
        };

        let target_dir = target.parent().unwrap_or(Path::new("."));
        let annotation = match self.labeler.annotation(&mut image, target_dir) {
            Ok(annotation) => annotation,
            Err(error) => {
                output::error(&format!(
                    "label dropped, converting without it:\n  {}\n{error}",
                    source.display()
                ));
                None
            }
        };
        if let Some(tool) = image.tool_missing() {
            return Err(WalkError::ToolMissing(tool.to_string()));
        }

        // Move the original out of the way; conversion then reads from the
        // backup and writes the converted image to the original name.
        let mut src = source.to_path_buf();
        if let Some(backup) = backup
            && backup != source
        {
            match move_file(source, backup) {
                Ok(()) => {
                    image.move_to(backup.to_path_buf());
                    src = backup.to_path_buf();
                }
                Err(error) => output::error(&format!(
                    "can't move source file to backup:\n  {}\nto:\n  {}\n{error}",
                    source.display(),
                    backup.display()
                )),
            }
        }

        let params = ConvertParams {
            source: src.clone(),
            target: target.to_path_buf(),
            auto_orient: true,
            resize,
            quality: self.config.quality,
            strip: true,
            annotation,
        };
        match self.backend.convert(&params) {
            Ok(()) => {
                self.stats.files_converted += 1;
                self.created.mark_output(target);
                Ok(())
            }
            Err(error) => {
                if src != source
                    && let Err(revert) = move_file(&src, source)
                {
                    output::error(&format!(
                        "can't revert source file from backup:\n  {}\nto:\n  {}\n{revert}",
                        src.display(),
                        source.display()
                    ));
                }
                match error {
                    BackendError::ToolNotFound(tool) => Err(WalkError::ToolMissing(tool)),
                    error => {
                        output::error(&format!(
                            "conversion failed:\n  {}\n{error}",
                            source.display()
                        ));
                        Ok(())
                    }
                }
            }
        }
    }
}

/// Rename, falling back to copy-and-remove across filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Gravity;
    use crate::backend::tests::MockBackend;
    use std::fs;
    use tempfile::TempDir;

    fn walker<'a>(
        backend: &'a MockBackend,
        config: &'a ConvertConfig,
        target_root: Option<PathBuf>,
        backup_enabled: bool,
    ) -> Walker<'a, MockBackend> {
        let labeler = Labeler::new(None, Gravity::SouthEast, config).unwrap();
        Walker::new(backend, config, labeler, target_root, backup_enabled).unwrap()
    }

    fn photo(path: &Path) {
        fs::write(path, b"original").unwrap();
    }

    #[test]
    fn in_place_run_backs_up_originals_and_converts() {
        let tmp = TempDir::new().unwrap();
        let trip = tmp.path().join("trip");
        fs::create_dir_all(trip.join("sub")).unwrap();
        photo(&trip.join("a.jpg"));
        photo(&trip.join("b.jpg"));
        photo(&trip.join("sub").join("c.jpg"));
        photo(&trip.join("notes.txt"));

        let config = ConvertConfig::default();
        let backend = MockBackend::new()
            .with_image("a.jpg", (800, 600), None)
            .with_image("b.jpg", (800, 600), None)
            .with_image("c.jpg", (800, 600), None);

        let stats = walker(&backend, &config, None, true)
            .run(&[trip.clone()])
            .unwrap();

        assert_eq!(stats.files_found, 3);
        assert_eq!(stats.files_converted, 3);

        // Originals live in the backup tree, converted files replaced them.
        let backup = tmp.path().join("backup").join("trip");
        assert_eq!(fs::read(backup.join("a.jpg")).unwrap(), b"original");
        assert_eq!(fs::read(backup.join("sub").join("c.jpg")).unwrap(), b"original");
        assert_eq!(fs::read(trip.join("a.jpg")).unwrap(), b"converted");
        assert_eq!(fs::read(trip.join("sub").join("c.jpg")).unwrap(), b"converted");
        // Unsupported files are untouched.
        assert_eq!(fs::read(trip.join("notes.txt")).unwrap(), b"original");
    }

    #[test]
    fn no_backup_run_converts_in_place_without_artifacts() {
        let tmp = TempDir::new().unwrap();
        let trip = tmp.path().join("trip");
        fs::create_dir(&trip).unwrap();
        photo(&trip.join("a.jpg"));

        let config = ConvertConfig::default();
        let backend = MockBackend::new().with_image("a.jpg", (800, 600), None);
        let stats = walker(&backend, &config, None, false)
            .run(&[trip.clone()])
            .unwrap();

        assert_eq!(stats.files_converted, 1);
        assert_eq!(fs::read(trip.join("a.jpg")).unwrap(), b"converted");
        assert!(!tmp.path().join("backup").exists());
    }

    #[test]
    fn backup_choice_changes_only_the_backup_artifact() {
        let config = ConvertConfig::default();

        let run = |backup_enabled: bool| {
            let tmp = TempDir::new().unwrap();
            let file = tmp.path().join("a.jpg");
            photo(&file);
            let backend = MockBackend::new().with_image("a.jpg", (800, 600), None);
            let stats = walker(&backend, &config, None, backup_enabled)
                .run(std::slice::from_ref(&file))
                .unwrap();
            (fs::read(&file).unwrap(), stats.files_converted, tmp)
        };

        let (with_backup, converted_a, tmp_a) = run(true);
        let (without_backup, converted_b, tmp_b) = run(false);
        assert_eq!(with_backup, without_backup);
        assert_eq!(converted_a, converted_b);
        assert!(tmp_a.path().join("backup").join("a.jpg").exists());
        assert!(!tmp_b.path().join("backup").exists());
    }

    #[test]
    fn directory_tree_rebased_under_destination() {
        let tmp = TempDir::new().unwrap();
        let trip = tmp.path().join("trip");
        fs::create_dir_all(trip.join("day2")).unwrap();
        photo(&trip.join("a.jpg"));
        photo(&trip.join("day2").join("b.jpg"));
        let dest = tmp.path().join("dest");

        let config = ConvertConfig::default();
        let backend = MockBackend::new()
            .with_image("a.jpg", (800, 600), None)
            .with_image("b.jpg", (800, 600), None);

        let stats = walker(&backend, &config, Some(dest.clone()), true)
            .run(&[trip.clone()])
            .unwrap();

        assert_eq!(stats.files_converted, 2);
        // The source root reappears as a subdirectory of the destination.
        assert!(dest.join("trip").join("a.jpg").exists());
        assert!(dest.join("trip").join("day2").join("b.jpg").exists());
        // Sources are their own backups and never move.
        assert_eq!(fs::read(trip.join("a.jpg")).unwrap(), b"original");
    }

    #[test]
    fn same_named_files_in_flat_destination_get_suffixes() {
        let tmp = TempDir::new().unwrap();
        let dir_a = tmp.path().join("a");
        let dir_b = tmp.path().join("b");
        fs::create_dir(&dir_a).unwrap();
        fs::create_dir(&dir_b).unwrap();
        photo(&dir_a.join("img.jpg"));
        photo(&dir_b.join("img.jpg"));
        let dest = tmp.path().join("dest");

        let config = ConvertConfig::default();
        let backend = MockBackend::new().with_image("img.jpg", (800, 600), None);

        let stats = walker(&backend, &config, Some(dest.clone()), true)
            .run(&[dir_a.join("img.jpg"), dir_b.join("img.jpg")])
            .unwrap();

        assert_eq!(stats.files_converted, 2);
        assert!(dest.join("img.jpg").exists());
        assert!(dest.join("img_001.jpg").exists());
    }

    #[test]
    fn failed_conversion_reverts_the_backup_move() {
        let tmp = TempDir::new().unwrap();
        let trip = tmp.path().join("trip");
        fs::create_dir(&trip).unwrap();
        photo(&trip.join("a.jpg"));

        let config = ConvertConfig::default();
        let backend = MockBackend::new()
            .with_image("a.jpg", (800, 600), None)
            .failing_on("a.jpg");

        let stats = walker(&backend, &config, None, true)
            .run(&[trip.clone()])
            .unwrap();

        assert_eq!(stats.files_found, 1);
        assert_eq!(stats.files_converted, 0);
        // Original back in place, useless backup tree pruned.
        assert_eq!(fs::read(trip.join("a.jpg")).unwrap(), b"original");
        assert!(!tmp.path().join("backup").exists());
    }

    #[test]
    fn created_destination_dirs_pruned_when_nothing_converts() {
        let tmp = TempDir::new().unwrap();
        let trip = tmp.path().join("trip");
        fs::create_dir(&trip).unwrap();
        photo(&trip.join("a.jpg"));
        let dest = tmp.path().join("dest");

        let config = ConvertConfig::default();
        let backend = MockBackend::new()
            .with_image("a.jpg", (800, 600), None)
            .failing_on("a.jpg");

        let stats = walker(&backend, &config, Some(dest.clone()), true)
            .run(&[trip])
            .unwrap();

        assert_eq!(stats.files_converted, 0);
        assert!(!dest.exists());
    }

    #[test]
    fn oversized_images_get_a_long_edge_resize() {
        let tmp = TempDir::new().unwrap();
        photo(&tmp.path().join("wide.jpg"));
        photo(&tmp.path().join("tall.jpg"));
        photo(&tmp.path().join("small.jpg"));

        let config = ConvertConfig::default();
        let backend = MockBackend::new()
            .with_image("wide.jpg", (4000, 3000), None)
            .with_image("tall.jpg", (3000, 4000), None)
            .with_image("small.jpg", (800, 600), None);

        walker(&backend, &config, None, false)
            .run(&[
                tmp.path().join("wide.jpg"),
                tmp.path().join("tall.jpg"),
                tmp.path().join("small.jpg"),
            ])
            .unwrap();

        let resize_of = |name: &str| {
            backend
                .converts()
                .into_iter()
                .find(|p| p.source.file_name().unwrap() == name)
                .unwrap()
                .resize
        };
        assert_eq!(resize_of("small.jpg"), None);
        assert_eq!(resize_of("tall.jpg"), Some(Resize::Height(1920)));
        assert_eq!(resize_of("wide.jpg"), Some(Resize::Width(1920)));
    }

    #[test]
    fn missing_sources_are_skipped_not_fatal() {
        let config = ConvertConfig::default();
        let backend = MockBackend::new();
        let stats = walker(&backend, &config, None, true)
            .run(&[PathBuf::from("/nonexistent/photo.jpg")])
            .unwrap();
        assert!(!stats.source_found);
        assert_eq!(stats.files_found, 0);
    }

    #[test]
    fn source_inside_destination_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("dest");
        fs::create_dir(&dest).unwrap();
        photo(&dest.join("a.jpg"));

        let config = ConvertConfig::default();
        let backend = MockBackend::new().with_image("a.jpg", (800, 600), None);
        let stats = walker(&backend, &config, Some(dest.clone()), true)
            .run(&[dest.join("a.jpg")])
            .unwrap();
        assert_eq!(stats.files_found, 0);
        assert_eq!(fs::read(dest.join("a.jpg")).unwrap(), b"original");
    }

    #[test]
    fn file_destination_is_rejected_up_front() {
        let tmp = TempDir::new().unwrap();
        let not_a_dir = tmp.path().join("dest");
        fs::write(&not_a_dir, b"x").unwrap();

        let config = ConvertConfig::default();
        let backend = MockBackend::new();
        let labeler = Labeler::new(None, Gravity::SouthEast, &config).unwrap();
        assert!(matches!(
            Walker::new(&backend, &config, labeler, Some(not_a_dir), true),
            Err(WalkError::DestinationNotFolder(_))
        ));
    }

    #[test]
    fn missing_tool_aborts_the_run() {
        let tmp = TempDir::new().unwrap();
        photo(&tmp.path().join("a.jpg"));
        photo(&tmp.path().join("b.jpg"));

        let config = ConvertConfig::default();
        let backend = MockBackend {
            tool_not_found: true,
            ..MockBackend::new()
        };

        let result = walker(&backend, &config, None, false)
            .run(&[tmp.path().join("a.jpg"), tmp.path().join("b.jpg")]);
        assert!(matches!(result, Err(WalkError::ToolMissing(_))));
        // Nothing was touched.
        assert_eq!(fs::read(tmp.path().join("a.jpg")).unwrap(), b"original");
        assert_eq!(fs::read(tmp.path().join("b.jpg")).unwrap(), b"original");
    }

    #[test]
    fn labels_travel_into_the_convert_call() {
        let tmp = TempDir::new().unwrap();
        photo(&tmp.path().join("a.jpg"));

        let config = ConvertConfig::default();
        let backend =
            MockBackend::new().with_image("a.jpg", (1920, 1440), Some("2020:08:19 15:47:45"));
        let labeler = Labeler::new(Some("[Month YYYY]"), Gravity::SouthWest, &config).unwrap();
        let walker = Walker::new(&backend, &config, labeler, None, false).unwrap();
        walker.run(&[tmp.path().join("a.jpg")]).unwrap();

        let converts = backend.converts();
        let annotation = converts[0].annotation.as_ref().unwrap();
        assert_eq!(annotation.gravity, Gravity::SouthWest);
        assert_eq!(
            annotation.payload,
            crate::backend::LabelPayload::Inline("August 2020".to_string())
        );
    }
}
