use crate::result::Result;
use crate::utils;
use std::fs;
use std::path::Path;

/// Outcome of a resource collection pass
pub struct CollectSummary {
    /// Resource names copied into the staging directory
    pub copied: Vec<String>,

    /// Resource names skipped because their source directory is absent
    pub skipped: Vec<String>,
}

/// Create a fresh staging directory, discarding anything a prior crashed run
/// left behind.
pub fn prepare_staging(staging_root: &Path) -> Result<()> {
    if staging_root.exists() {
        fs::remove_dir_all(staging_root)?;
    }
    fs::create_dir_all(staging_root)?;
    Ok(())
}

/// Copy each configured resource directory from the source tree into the
/// staging directory. Missing resource directories are skipped, not errors.
pub fn collect_resources(
    resources: &[(String, String)],
    source_root: &Path,
    staging_root: &Path,
) -> Result<CollectSummary> {
    let mut summary = CollectSummary {
        copied: Vec::new(),
        skipped: Vec::new(),
    };

    for (name, relative_path) in resources {
        let source = source_root.join(relative_path);
        if source.is_dir() {
            utils::copy_recursively(&source, &staging_root.join(name))?;
            summary.copied.push(name.clone());
        } else {
            summary.skipped.push(name.clone());
        }
    }

    Ok(summary)
}

/// Remove the staging directory and everything under it. No error if a
/// failed run already left nothing behind.
pub fn cleanup_staging(staging_root: &Path) -> Result<()> {
    if staging_root.exists() {
        fs::remove_dir_all(staging_root)?;
    }
    Ok(())
}
