//! Label delivery: inline argument or temporary text file.
//!
//! Short single-line labels of printable ASCII pass straight to the external
//! tool as a command argument. Anything else — multiple lines, national
//! letters, control characters — is materialized into a UTF-8 temp file in
//! the destination directory (old ImageMagick versions cannot read non-ASCII
//! text from the command line).
//!
//! The writer keeps the last written file and reuses it while the directory
//! and the line-broken content are unchanged, so a run labeling a whole
//! directory with the same static text writes once. Temp files are removed
//! on drop, which covers every exit path including conversion failure.

use crate::backend::LabelPayload;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("can't create label file in {dir}: {source}")]
    TempFile {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("can't write label file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn is_inline_safe(line: &str) -> bool {
    line.chars().all(|c| (' '..='~').contains(&c))
}

struct CachedFile {
    dir: PathBuf,
    content: String,
    // Removed from disk when replaced or when the writer drops.
    file: NamedTempFile,
}

/// Writes label text files and reuses them across images.
#[derive(Default)]
pub struct LabelWriter {
    cache: Option<CachedFile>,
}

impl LabelWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn wrapped label lines into an annotation payload for a conversion
    /// targeting `dir`.
    ///
    /// Fails closed: any I/O problem surfaces as an error and no payload is
    /// produced.
    pub fn render(&mut self, lines: &[String], dir: &Path) -> Result<LabelPayload, DeliveryError> {
        if let [line] = lines
            && is_inline_safe(line)
        {
            return Ok(LabelPayload::Inline(line.clone()));
        }

        let content = lines.join("\n");

        let reusable = self
            .cache
            .as_ref()
            .is_some_and(|c| c.dir == dir && c.content == content);
        if !reusable {
            let mut file = tempfile::Builder::new()
                .prefix("mapready-label-")
                .suffix(".txt")
                .tempfile_in(dir)
                .map_err(|source| DeliveryError::TempFile {
                    dir: dir.to_path_buf(),
                    source,
                })?;
            file.write_all(content.as_bytes())
                .and_then(|_| file.flush())
                .map_err(|source| DeliveryError::Write {
                    path: file.path().to_path_buf(),
                    source,
                })?;
            self.cache = Some(CachedFile {
                dir: dir.to_path_buf(),
                content,
                file,
            });
        }

        Ok(LabelPayload::File(
            self.cache.as_ref().unwrap().file.path().to_path_buf(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn lines(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_ascii_line_is_inline() {
        let tmp = TempDir::new().unwrap();
        let mut writer = LabelWriter::new();
        let payload = writer.render(&lines(&["August 2020"]), tmp.path()).unwrap();
        assert_eq!(payload, LabelPayload::Inline("August 2020".to_string()));
    }

    #[test]
    fn multi_line_label_goes_to_file() {
        let tmp = TempDir::new().unwrap();
        let mut writer = LabelWriter::new();
        let payload = writer
            .render(&lines(&["first line", "second line"]), tmp.path())
            .unwrap();
        match payload {
            LabelPayload::File(path) => {
                assert_eq!(path.parent(), Some(tmp.path()));
                assert_eq!(fs::read_to_string(path).unwrap(), "first line\nsecond line");
            }
            other => panic!("expected file payload, got {other:?}"),
        }
    }

    #[test]
    fn non_ascii_label_goes_to_file() {
        let tmp = TempDir::new().unwrap();
        let mut writer = LabelWriter::new();
        let payload = writer
            .render(&lines(&["Центральный парк"]), tmp.path())
            .unwrap();
        match payload {
            LabelPayload::File(path) => {
                assert_eq!(fs::read_to_string(path).unwrap(), "Центральный парк");
            }
            other => panic!("expected file payload, got {other:?}"),
        }
    }

    #[test]
    fn identical_content_reuses_the_same_file() {
        let tmp = TempDir::new().unwrap();
        let mut writer = LabelWriter::new();
        let first = writer.render(&lines(&["a", "b"]), tmp.path()).unwrap();
        let second = writer.render(&lines(&["a", "b"]), tmp.path()).unwrap();
        assert_eq!(first, second);
        // One temp file on disk, not two.
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn changed_content_replaces_the_old_file() {
        let tmp = TempDir::new().unwrap();
        let mut writer = LabelWriter::new();
        let first = writer.render(&lines(&["a", "b"]), tmp.path()).unwrap();
        let second = writer.render(&lines(&["c", "d"]), tmp.path()).unwrap();
        assert_ne!(first, second);
        // The replaced file was removed.
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn changed_directory_writes_a_new_file() {
        let tmp_a = TempDir::new().unwrap();
        let tmp_b = TempDir::new().unwrap();
        let mut writer = LabelWriter::new();
        writer.render(&lines(&["a", "b"]), tmp_a.path()).unwrap();
        let payload = writer.render(&lines(&["a", "b"]), tmp_b.path()).unwrap();
        match payload {
            LabelPayload::File(path) => assert_eq!(path.parent(), Some(tmp_b.path())),
            other => panic!("expected file payload, got {other:?}"),
        }
    }

    #[test]
    fn temp_files_removed_on_drop() {
        let tmp = TempDir::new().unwrap();
        {
            let mut writer = LabelWriter::new();
            writer.render(&lines(&["a", "b"]), tmp.path()).unwrap();
            assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
        }
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_fails_closed() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("nope");
        let mut writer = LabelWriter::new();
        assert!(matches!(
            writer.render(&lines(&["a", "b"]), &gone),
            Err(DeliveryError::TempFile { .. })
        ));
    }
}
