use crate::result::Result;
use crate::utils;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build the bundle archive from the staging directory.
///
/// Any archive left by a previous run is deleted first, so the output only
/// ever reflects the current staging contents. Returns the number of file
/// entries written. Entry names are staging-relative with `/` separators;
/// directories are implied by entry paths rather than stored themselves.
pub fn build_archive(staging_root: &Path, output_path: &Path, verbose: bool) -> Result<usize> {
    if let Some(parent) = output_path.parent() {
        utils::ensure_dir(parent)?;
    }

    if output_path.exists() {
        fs::remove_file(output_path)?;
    }

    let file = File::create(output_path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut entries = 0;
    let walkdir = WalkDir::new(staging_root);
    for entry in walkdir.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        // walkdir is rooted at staging_root, so the prefix always strips
        let name = entry_name(path.strip_prefix(staging_root).unwrap());

        zip.start_file(&name, options)?;
        let mut f = File::open(path)?;
        let mut buffer = Vec::new();
        f.read_to_end(&mut buffer)?;
        zip.write_all(&buffer)?;

        if verbose {
            println!("   - added {}", name);
        }
        entries += 1;
    }

    zip.finish()?;
    Ok(entries)
}

/// Archive entry name for a staging-relative path, `/`-separated on every
/// platform.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn entry_names(archive_path: &Path) -> HashSet<String> {
        let mut archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_entry_name_is_slash_separated() {
        let rel = PathBuf::from("guide").join("sub").join("a.txt");
        assert_eq!(entry_name(&rel), "guide/sub/a.txt");
    }

    #[test]
    fn test_archive_holds_union_of_staged_files() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");
        fs::create_dir_all(staging.join("guide")).unwrap();
        fs::create_dir_all(staging.join("stage").join("js")).unwrap();
        fs::write(staging.join("guide").join("a.txt"), b"alpha").unwrap();
        fs::write(staging.join("stage").join("js").join("b.js"), b"beta").unwrap();

        let out = tmp.path().join("app.zip");
        let count = build_archive(&staging, &out, false).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            entry_names(&out),
            HashSet::from(["guide/a.txt".to_string(), "stage/js/b.js".to_string()])
        );

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let mut contents = String::new();
        archive
            .by_name("guide/a.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "alpha");
    }

    #[test]
    fn test_empty_staging_produces_valid_empty_archive() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");
        fs::create_dir_all(&staging).unwrap();

        let out = tmp.path().join("app.zip");
        let count = build_archive(&staging, &out, false).unwrap();

        assert_eq!(count, 0);
        assert!(entry_names(&out).is_empty());
    }

    #[test]
    fn test_previous_archive_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");
        fs::create_dir_all(staging.join("guide")).unwrap();
        fs::write(staging.join("guide").join("old.txt"), b"old").unwrap();

        let out = tmp.path().join("app.zip");
        build_archive(&staging, &out, false).unwrap();

        fs::remove_file(staging.join("guide").join("old.txt")).unwrap();
        fs::write(staging.join("guide").join("new.txt"), b"new").unwrap();
        build_archive(&staging, &out, false).unwrap();

        assert_eq!(entry_names(&out), HashSet::from(["guide/new.txt".to_string()]));
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("staging");
        fs::create_dir_all(&staging).unwrap();

        let out = tmp.path().join("assets").join("deep").join("app.zip");
        build_archive(&staging, &out, false).unwrap();

        assert!(out.is_file());
    }
}
