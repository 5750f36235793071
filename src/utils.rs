use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy a file or directory recursively
pub fn copy_recursively(source: &Path, destination: &Path) -> Result<()> {
    if source.is_dir() {
        if !destination.exists() {
            fs::create_dir_all(destination)?;
        }

        for entry in fs::read_dir(source)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let src_path = entry.path();
            let dst_path = destination.join(entry.file_name());

            if file_type.is_dir() {
                copy_recursively(&src_path, &dst_path)?;
            } else {
                fs::copy(&src_path, &dst_path)?;
            }
        }
    } else {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, destination)?;
    }

    Ok(())
}

/// Resolve the project root from the --path argument or the current directory
pub fn find_project_root(path: Option<&Path>) -> Result<PathBuf> {
    let root = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(crate::error::Error::custom(format!(
            "project root not found: {}",
            root.display()
        )));
    }

    Ok(root)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Format a byte count using 1024-based units with one decimal place
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }

    format!("{:.1} TB", size)
}
