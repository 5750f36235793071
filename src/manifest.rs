use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Default bundle manifest filename looked up at the project root
pub const BUNDLE_MANIFEST: &str = "bundle.toml";

/// Archive filename consumed by the Android shell at startup
pub const DEFAULT_ARCHIVE: &str = "app.zip";

const DEFAULT_SOURCE_DIR: &str = "frontend";
const DEFAULT_ANDROID_DIR: &str = "android";
const DEFAULT_STAGING_DIR: &str = "assetpack-build";

/// Resource directories bundled when the manifest does not list its own
const DEFAULT_RESOURCES: [&str; 4] = ["appearance", "guide", "stage", "changelogs"];

/// Raw `bundle.toml` contents; every field is optional and falls back to the
/// fixed project layout.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct BundleToml {
    /// Frontend source tree, relative to the project root
    #[serde(default)]
    pub source: Option<String>,

    /// Android application tree, relative to the project root
    #[serde(default)]
    pub android: Option<String>,

    /// Output archive filename inside the asset directory
    #[serde(default)]
    pub archive: Option<String>,

    /// Staging directory used to assemble resources before archiving
    #[serde(default)]
    pub staging: Option<String>,

    /// Resource directories to bundle, as `{ name = "relative/path" }` tables
    #[serde(default)]
    pub resources: Vec<HashMap<String, String>>,
}

/// Parsed and resolved bundle configuration
pub struct Manifest {
    /// Frontend source tree the resources are copied from
    pub source_root: PathBuf,

    /// Asset directory inside the Android tree receiving the archive
    pub assets_dir: PathBuf,

    /// Full path of the output archive
    pub archive_path: PathBuf,

    /// Staging directory, exclusively owned by one run
    pub staging_dir: PathBuf,

    /// Ordered (name, relative-path) pairs; names are staging subdirectories
    pub resources: Vec<(String, String)>,
}

impl Manifest {
    /// Load the bundle configuration for a project.
    ///
    /// An explicitly given manifest path must exist; the default
    /// `bundle.toml` is optional and its absence selects the fixed layout.
    pub fn load(ctx: &Context, manifest_path: Option<&Path>) -> Result<Self> {
        let config = match manifest_path {
            Some(path) => {
                let path = ctx.base_dir.join(path);
                if !path.is_file() {
                    return Err(Error::custom(format!(
                        "bundle manifest not found: {}",
                        path.display()
                    )));
                }
                toml::from_str(&fs::read_to_string(&path)?)?
            }
            None => {
                let path = ctx.base_dir.join(BUNDLE_MANIFEST);
                if path.is_file() {
                    toml::from_str(&fs::read_to_string(&path)?)?
                } else {
                    BundleToml::default()
                }
            }
        };

        Self::from_config(ctx, config)
    }

    /// Resolve raw manifest fields against the project root.
    pub fn from_config(ctx: &Context, config: BundleToml) -> Result<Self> {
        let source_root = ctx
            .base_dir
            .join(config.source.as_deref().unwrap_or(DEFAULT_SOURCE_DIR));

        let android_root = ctx
            .base_dir
            .join(config.android.as_deref().unwrap_or(DEFAULT_ANDROID_DIR));
        let assets_dir = android_root.join("app").join("src").join("main").join("assets");

        let archive_path = assets_dir.join(config.archive.as_deref().unwrap_or(DEFAULT_ARCHIVE));

        let staging_dir = match config.staging {
            Some(dir) => ctx.base_dir.join(dir),
            None => std::env::temp_dir().join(DEFAULT_STAGING_DIR),
        };

        let mut resources = Vec::new();
        if config.resources.is_empty() {
            for name in DEFAULT_RESOURCES {
                resources.push((name.to_string(), name.to_string()));
            }
        } else {
            for resource_map in &config.resources {
                for (name, path) in resource_map {
                    resources.push((name.clone(), path.clone()));
                }
            }
        }

        // Distinct names, or staged directories would overwrite each other
        let mut seen = HashSet::new();
        for (name, _) in &resources {
            if !seen.insert(name.as_str()) {
                return Err(Error::custom(format!(
                    "duplicate resource name in bundle manifest: {}",
                    name
                )));
            }
        }

        Ok(Manifest {
            source_root,
            assets_dir,
            archive_path,
            staging_dir,
            resources,
        })
    }
}
