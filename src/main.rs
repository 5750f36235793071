mod archive;
mod args;
mod context;
mod error;
mod manifest;
mod result;
mod stage;
mod utils;

use args::Args;
use context::Context;
use error::Error;
use manifest::Manifest;
use std::fs;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    // Parse command-line arguments
    let Args {
        verbose,
        path,
        manifest: bundle_manifest,
        staging,
    } = Args::parse();

    // Resolve the project root
    let project_root = utils::find_project_root(path.as_deref())?;
    let ctx = Context::new(project_root, verbose);

    // Use cliclack for nice UI
    cliclack::intro("assetpack")?;

    // Load bundle configuration
    let mut manifest = {
        let spinner = cliclack::spinner();
        spinner.start("Loading bundle configuration...");
        match Manifest::load(&ctx, bundle_manifest.as_deref()) {
            Ok(m) => {
                spinner.stop(format!(
                    "Bundling {} resource directories from {}",
                    m.resources.len(),
                    m.source_root.display()
                ));
                m
            }
            Err(e) => {
                spinner.error("Failed to load bundle configuration");
                return Err(e);
            }
        }
    };

    if let Some(dir) = staging {
        manifest.staging_dir = ctx.base_dir.join(dir);
    }

    // The frontend tree must exist before anything is touched on disk
    if !manifest.source_root.is_dir() {
        cliclack::outro_cancel("Frontend source directory not found")?;
        return Err(Error::SourceRootMissing(manifest.source_root));
    }

    // Stage a clean working directory
    {
        let spinner = cliclack::spinner();
        spinner.start("Preparing staging directory...");
        stage::prepare_staging(&manifest.staging_dir)?;
        spinner.stop(format!("Staging at {}", manifest.staging_dir.display()));
    }

    // Collect frontend resources
    let summary = {
        let spinner = cliclack::spinner();
        spinner.start("Collecting frontend resources...");
        let summary = stage::collect_resources(
            &manifest.resources,
            &manifest.source_root,
            &manifest.staging_dir,
        )?;
        spinner.stop(format!(
            "Copied {} of {} resource directories",
            summary.copied.len(),
            manifest.resources.len()
        ));
        summary
    };

    if verbose {
        for name in &summary.copied {
            println!("   - copied {}", name);
        }
    }
    for name in &summary.skipped {
        println!("   - skipped {} (directory not found)", name);
    }

    // Build the archive; the staging directory is removed either way
    let entries = {
        let spinner = cliclack::spinner();
        spinner.start("Building bundle archive...");
        let built = archive::build_archive(&manifest.staging_dir, &manifest.archive_path, verbose);
        let cleaned = stage::cleanup_staging(&manifest.staging_dir);
        match built {
            Ok(n) => {
                cleaned?;
                spinner.stop(format!("Archive written ({} entries)", n));
                n
            }
            Err(e) => {
                spinner.error("Archive build failed");
                return Err(e);
            }
        }
    };

    // Verify the archive exists and report
    if !manifest.archive_path.is_file() {
        cliclack::outro_cancel("Bundle archive was not produced")?;
        return Err(Error::ArchiveMissing(manifest.archive_path));
    }

    let size = fs::metadata(&manifest.archive_path)?.len();
    println!(
        "Archive: {} ({}, {} entries)",
        manifest.archive_path.display(),
        utils::format_size(size),
        entries
    );
    println!("Next steps:");
    println!("  1. Place the native kernel library under app/libs/ if it changed");
    println!("  2. Run ./gradlew assembleRelease in the android tree to build the APK");

    cliclack::outro("Frontend bundle created successfully!")?;
    Ok(())
}
