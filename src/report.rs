//! Duplicate report presentation.
//!
//! The default output is one `dup:` line per detected pair. Visual mode
//! instead prints a metadata block for both files (size, resolution, md5)
//! and hands the pair to an external side-by-side viewer named by the
//! `IMGDUPE_VIEWER` environment variable. Viewer and metadata failures are
//! per-pair diagnostics, never fatal.

use std::path::Path;
use std::process::Command;

use md5::{Digest, Md5};

use crate::duplicates::DuplicateReport;

/// Environment variable naming the external image viewer command.
///
/// Whitespace-split: the first token is the program, the rest are leading
/// arguments; both file paths are appended.
pub const VIEWER_ENV: &str = "IMGDUPE_VIEWER";

/// Sentinel printed in place of the checksum column when the two files of a
/// pair are byte-identical.
const IDENTICAL_SENTINEL: &str = "(identical)";

/// Per-file metadata shown in visual mode.
struct FileInfo {
    size: u64,
    resolution: String,
    md5: String,
}

/// Print all duplicate reports for `dir`, in the mode `visual` selects.
pub fn print_reports(dir: &Path, reports: &[DuplicateReport], visual: bool) {
    for report in reports {
        if visual {
            show_pair(dir, report);
        } else {
            println!(
                "dup: {} {} {}",
                report.fingerprint, report.previous, report.current
            );
        }
    }
}

/// Visual-mode handling of one pair: metadata block plus external viewer.
fn show_pair(dir: &Path, report: &DuplicateReport) {
    let prev = dir.join(&report.previous);
    let curr = dir.join(&report.current);

    match (file_info(&prev), file_info(&curr)) {
        (Ok(a), Ok(b)) => {
            let identical = a.md5 == b.md5 && a.size == b.size;
            print_info(&report.previous, &a, identical);
            print_info(&report.current, &b, identical);
        }
        (Err(e), _) | (_, Err(e)) => {
            log::warn!("Failed to read metadata for duplicate pair: {e}");
            println!(
                "dup: {} {} {}",
                report.fingerprint, report.previous, report.current
            );
        }
    }

    spawn_viewer(&prev, &curr);
}

fn print_info(path: &str, info: &FileInfo, identical: bool) {
    let checksum = if identical {
        IDENTICAL_SENTINEL
    } else {
        info.md5.as_str()
    };
    println!("{:>10}  {:>11}  {:<32}  {}", info.size, info.resolution, checksum, path);
}

fn file_info(path: &Path) -> std::io::Result<FileInfo> {
    let size = std::fs::metadata(path)?.len();
    let resolution = match image::image_dimensions(path) {
        Ok((w, h)) => format!("{w}x{h}"),
        Err(_) => "?".to_string(),
    };
    let md5 = hex::encode(Md5::digest(std::fs::read(path)?));
    Ok(FileInfo {
        size,
        resolution,
        md5,
    })
}

/// Launch the configured external viewer on a pair of files.
///
/// Does nothing when `IMGDUPE_VIEWER` is unset. Waits for the viewer to
/// exit, so pairs are reviewed one at a time.
fn spawn_viewer(a: &Path, b: &Path) {
    let Ok(viewer) = std::env::var(VIEWER_ENV) else {
        return;
    };
    let mut parts = viewer.split_whitespace();
    let Some(program) = parts.next() else {
        log::warn!("{VIEWER_ENV} is set but empty");
        return;
    };

    let status = Command::new(program)
        .args(parts)
        .arg(a)
        .arg(b)
        .status();
    match status {
        Ok(status) if !status.success() => {
            log::warn!("Viewer '{program}' exited with {status}");
        }
        Err(e) => log::warn!("Failed to launch viewer '{program}': {e}"),
        Ok(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_info_identical_bytes_share_md5() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        let ia = file_info(&a).unwrap();
        let ib = file_info(&b).unwrap();
        assert_eq!(ia.md5, ib.md5);
        assert_eq!(ia.size, 10);
        // Not an image, so resolution collapses to the unknown marker.
        assert_eq!(ia.resolution, "?");
    }

    #[test]
    fn test_file_info_resolution_of_real_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");
        image::RgbImage::new(24, 12).save(&path).unwrap();

        let info = file_info(&path).unwrap();
        assert_eq!(info.resolution, "24x12");
        assert_eq!(info.md5.len(), 32);
    }

    #[test]
    fn test_file_info_missing_file_errors() {
        let dir = tempdir().unwrap();
        assert!(file_info(&dir.path().join("gone.png")).is_err());
    }
}
